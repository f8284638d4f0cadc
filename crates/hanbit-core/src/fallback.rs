//! Deterministic fallback prompt assembly.
//!
//! Used only when the provider call reports failure. The fallback is
//! mechanical by design: translated core text plus the explicit option
//! values, joined in a fixed order. No creative variation, no provider.

use crate::request::GenerationRequest;
use crate::translate::Translator;

/// Assemble a usable prompt without an LLM.
///
/// Segment order: style, portrait clause, translated subject text(s),
/// composition (two-subject scenes only), camera angle, lens, lighting.
/// Axes delegated to the model ("auto") contribute nothing here — there is
/// no model to delegate to. For a two-subject scene the single-subject
/// portrait clause is omitted and both subjects plus the composition
/// description are included.
pub async fn compose_fallback(request: &GenerationRequest, translator: &dyn Translator) -> String {
    let translated = translator.translate(&request.subject, request.language).await;

    let mut segments: Vec<String> = Vec::new();

    if let Some(style) = request.style {
        segments.push(style.as_str().to_string());
    }

    if !request.is_composed_scene() {
        let mut words = vec!["a portrait of a"];
        if let Some(ethnicity) = request.ethnicity {
            words.push(ethnicity.as_str());
        }
        words.push(request.gender.as_str());
        segments.push(format!(
            "{} in their {}",
            words.join(" "),
            request.age.as_str()
        ));
    }

    segments.push(translated);

    if request.is_composed_scene() {
        let subject2 = translator.translate(&request.subject2, request.language).await;
        segments.push(subject2);
        if !request.composition.trim().is_empty() {
            segments.push(request.composition.trim().to_string());
        }
    }

    if let Some(angle) = request.camera_angle {
        segments.push(format!("shot from a {}", angle.as_str()));
    }
    if let Some(lens) = request.lens {
        segments.push(format!("using a {} lens", lens.as_str()));
    }
    if let Some(lighting) = request.lighting {
        segments.push(lighting.as_str().to_string());
    }

    segments.retain(|s| !s.is_empty());
    segments.join(", ")
}
