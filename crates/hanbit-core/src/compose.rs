//! Instruction composition for the LLM call.
//!
//! Pure string assembly: given a request and a variation index, build the
//! natural-language instruction sent to the provider. Axes left to the model
//! render as bracketed delegated-choice clauses, never as the word "auto".

use crate::request::GenerationRequest;

/// Appended for every variation after the first. The only mechanism that
/// pushes the model away from duplicate outputs.
const VARIATION_SUFFIX: &str =
    "\n\nIMPORTANT: Generate a new, different variation of the prompt based on the same core request.";

/// Build the positive-prompt instruction for one variation.
pub fn compose(request: &GenerationRequest, variation: u32) -> String {
    let language = request.language.as_str();

    let base = if !request.is_composed_scene() {
        format!(
            "Generate a rich, descriptive image prompt about a single subject.\n\
             Translate the following Korean description of the subject into {language}:\n\
             `{}`\n\n\
             Creatively combine it with these characteristics:\n",
            request.subject
        )
    } else {
        format!(
            "Generate a rich, descriptive image prompt for a complex scene with two subjects.\n\n\
             - Subject 1 (in Korean): `{}`\n\
             - Subject 2 (in Korean): `{}`\n\n\
             Translate both subjects into {language} and place them in a scene based on the following composition description:\n\
             `{}`\n\n\
             Also, creatively combine the scene with these characteristics:\n",
            request.subject, request.subject2, request.composition
        )
    };

    let mut characteristics = Vec::new();

    match request.style {
        Some(style) => characteristics.push(format!("- Overall Style: {}", style.as_str())),
        None => characteristics
            .push("- Overall Style: [Choose a creative and fitting style]".to_string()),
    }

    if !request.artist_style.is_empty() {
        characteristics.push(format!(
            "- Art Style Influence: Emulate the distinct artistic style of {}, \
             paying attention to their characteristic techniques (e.g., brushstrokes, color palette, mood).",
            request.artist_style
        ));
    }

    // Subject details only make sense for a single subject
    if !request.is_composed_scene() {
        let age = request.age.as_str();
        let gender = request.gender.as_str();
        match request.ethnicity {
            Some(ethnicity) => characteristics.push(format!(
                "- Subject Details: A {age} {} {gender}",
                ethnicity.as_str()
            )),
            None => characteristics.push(format!(
                "- Subject Details: A {age} [Choose a fitting ethnicity] {gender}"
            )),
        }
    }

    let mut shot_details = Vec::new();
    match request.camera_angle {
        Some(angle) => shot_details.push(angle.as_str().to_string()),
        None => shot_details.push("[Choose a dynamic camera angle]".to_string()),
    }
    match request.lens {
        Some(lens) => shot_details.push(format!("{} lens", lens.as_str())),
        None => shot_details.push("[Choose a suitable lens]".to_string()),
    }
    match request.lighting {
        Some(lighting) => shot_details.push(format!("with {}", lighting.as_str())),
        None => shot_details.push("with [Choose impactful lighting]".to_string()),
    }
    characteristics.push(format!("- Cinematic Details: {}", shot_details.join(", ")));

    let mut instruction = base + &characteristics.join("\n");
    instruction.push_str(&format!(
        "\n\nThe final output should be a single, coherent, and detailed paragraph in {language} for an image generation model."
    ));

    if variation > 0 {
        instruction.push_str(VARIATION_SUFFIX);
    }

    instruction
}

/// Build the instruction that derives negative keywords from a positive prompt.
pub fn compose_negative(positive_prompt: &str) -> String {
    format!(
        "Based on the image prompt: \"{positive_prompt}\"\n\
         List comma-separated negative keywords to prevent common image artifacts, deformities, or unwanted elements. \
         Only output the keywords in a single line."
    )
}
