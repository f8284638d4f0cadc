//! The `hanbit enhance` command: build a request from flags and run the
//! orchestrator.

use anyhow::Context;
use clap::Args;
use hanbit_core::request::parse_axis;
use hanbit_core::{
    Config, EnhanceOutput, Enhancer, GenerationRequest, ProviderCredentials, ProviderKind,
    TargetLanguage,
};
use serde::Serialize;
use serde_json::value::RawValue;

/// Arguments for the `enhance` command.
///
/// Creative axes accept the literal option strings from the UI (e.g.
/// `--style "film noir"`, `--camera-angle "low-angle shot"`) or "auto" to
/// delegate the choice to the model.
#[derive(Args, Debug)]
pub struct EnhanceArgs {
    /// Korean description of the subject
    pub subject: String,

    /// Korean description of a second subject (makes this a composed scene)
    #[arg(long)]
    pub subject2: Option<String>,

    /// How the two subjects relate in the scene
    #[arg(long, default_value = "Subject 1 is the main focus.")]
    pub composition: String,

    /// Target language: English, Chinese, Chinese-Taiwan
    #[arg(long, default_value = "English")]
    pub language: String,

    /// LLM provider: gemini, openai (chatGPT), anthropic (Claude)
    #[arg(long, default_value = "gemini")]
    pub provider: String,

    /// Model identifier (overrides the config default)
    #[arg(long)]
    pub model: Option<String>,

    /// Overall style, or "auto"
    #[arg(long, default_value = "auto")]
    pub style: String,

    /// Artist or art-movement keywords to emulate
    #[arg(long, default_value = "")]
    pub artist_style: String,

    /// Subject ethnicity, or "auto"
    #[arg(long, default_value = "auto")]
    pub ethnicity: String,

    /// Subject age bracket: 10s, 20s, 30s, 40s, 50s+
    #[arg(long, default_value = "20s")]
    pub age: String,

    /// Subject gender: Male, Female, Person
    #[arg(long, default_value = "Female")]
    pub gender: String,

    /// Camera angle, or "auto"
    #[arg(long, default_value = "auto")]
    pub camera_angle: String,

    /// Lens, or "auto"
    #[arg(long, default_value = "auto")]
    pub lens: String,

    /// Lighting, or "auto"
    #[arg(long, default_value = "auto")]
    pub lighting: String,

    /// Number of prompt variants to generate (overrides the config default)
    #[arg(long)]
    pub variations: Option<u32>,

    /// Sampling temperature (overrides the config default)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Derive a negative prompt per variant via the LLM
    #[arg(long)]
    pub intelligent_negative: bool,

    /// User negative prompt (overrides the config default)
    #[arg(long)]
    pub negative: Option<String>,

    /// Gemini API key (overrides config)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// OpenAI API key (overrides config)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_key: Option<String>,

    /// Anthropic API key (overrides config)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_key: Option<String>,

    /// Emit the three outputs as a single JSON object
    #[arg(long)]
    pub json: bool,
}

/// Execute the enhance command.
pub async fn execute(args: EnhanceArgs, config: &Config) -> anyhow::Result<()> {
    let request = build_request(&args, config)?;

    let enhancer = Enhancer::new(&request)?;
    let output = enhancer.run(&request).await?;

    if args.json {
        println!("{}", render_json(&output)?);
    } else {
        println!("{}", output.prompts_batch);
        println!("\n--- negative prompt ---");
        println!("{}", output.negative_prompt);
        println!("\n--- metadata ---");
        println!("{}", output.metadata);
    }

    Ok(())
}

/// Emit the run output as one JSON object.
///
/// The metadata field is itself a JSON document; splice it in verbatim so
/// consumers get a nested object instead of an escaped string.
fn render_json(output: &EnhanceOutput) -> anyhow::Result<String> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        prompts_batch: &'a str,
        negative_prompt: &'a str,
        metadata: &'a RawValue,
    }

    let metadata: &RawValue = serde_json::from_str(&output.metadata)?;
    Ok(serde_json::to_string_pretty(&JsonOutput {
        prompts_batch: &output.prompts_batch,
        negative_prompt: &output.negative_prompt,
        metadata,
    })?)
}

/// Map flags and config defaults onto a `GenerationRequest`.
fn build_request(args: &EnhanceArgs, config: &Config) -> anyhow::Result<GenerationRequest> {
    let language: TargetLanguage = args
        .language
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let provider: ProviderKind = args.provider.parse().context("invalid --provider")?;

    let style = parse_axis(&args.style).map_err(|e| anyhow::anyhow!(e))?;
    let ethnicity = parse_axis(&args.ethnicity).map_err(|e| anyhow::anyhow!(e))?;
    let camera_angle = parse_axis(&args.camera_angle).map_err(|e| anyhow::anyhow!(e))?;
    let lens = parse_axis(&args.lens).map_err(|e| anyhow::anyhow!(e))?;
    let lighting = parse_axis(&args.lighting).map_err(|e| anyhow::anyhow!(e))?;
    let age = args.age.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let gender = args.gender.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // Flag keys take precedence over config-file keys
    let mut credentials: ProviderCredentials = config.credentials();
    if args.gemini_key.is_some() {
        credentials.gemini = args.gemini_key.clone();
    }
    if args.openai_key.is_some() {
        credentials.openai = args.openai_key.clone();
    }
    if args.anthropic_key.is_some() {
        credentials.anthropic = args.anthropic_key.clone();
    }

    Ok(GenerationRequest {
        subject: args.subject.clone(),
        subject2: args.subject2.clone().unwrap_or_default(),
        composition: args.composition.clone(),
        language,
        provider,
        model: args
            .model
            .clone()
            .unwrap_or_else(|| config.defaults.model.clone()),
        style,
        artist_style: args.artist_style.clone(),
        ethnicity,
        age,
        gender,
        camera_angle,
        lens,
        lighting,
        variations: args.variations.unwrap_or(config.defaults.variations),
        temperature: args.temperature.unwrap_or(config.defaults.temperature),
        intelligent_negative: args.intelligent_negative,
        negative_prompt: args
            .negative
            .clone()
            .unwrap_or_else(|| config.defaults.negative_prompt.clone()),
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanbit_core::Style;

    fn args_for(subject: &str) -> EnhanceArgs {
        EnhanceArgs {
            subject: subject.to_string(),
            subject2: None,
            composition: "Subject 1 is the main focus.".to_string(),
            language: "English".to_string(),
            provider: "gemini".to_string(),
            model: None,
            style: "auto".to_string(),
            artist_style: String::new(),
            ethnicity: "auto".to_string(),
            age: "20s".to_string(),
            gender: "Female".to_string(),
            camera_angle: "auto".to_string(),
            lens: "auto".to_string(),
            lighting: "auto".to_string(),
            variations: None,
            temperature: None,
            intelligent_negative: false,
            negative: None,
            gemini_key: None,
            openai_key: None,
            anthropic_key: None,
            json: false,
        }
    }

    #[test]
    fn test_build_request_defaults_from_config() {
        let config = Config::default();
        let request = build_request(&args_for("한복을 입은 여성"), &config).unwrap();
        assert_eq!(request.model, "gemini-1.5-flash-latest");
        assert_eq!(request.variations, 1);
        assert_eq!(request.style, None);
        assert!(!request.is_composed_scene());
    }

    #[test]
    fn test_build_request_axis_literals() {
        let config = Config::default();
        let mut args = args_for("한복을 입은 여성");
        args.style = "film noir".to_string();
        args.provider = "Claude".to_string();
        let request = build_request(&args, &config).unwrap();
        assert_eq!(request.style, Some(Style::FilmNoir));
        assert_eq!(request.provider, ProviderKind::Anthropic);
    }

    #[test]
    fn test_build_request_rejects_unknown_axis_value() {
        let config = Config::default();
        let mut args = args_for("한복을 입은 여성");
        args.lighting = "moonbeam".to_string();
        assert!(build_request(&args, &config).is_err());
    }

    #[test]
    fn test_json_output_embeds_metadata_as_object() {
        let output = EnhanceOutput {
            prompts_batch: "a cat under the moonlight".to_string(),
            negative_prompt: "blurry".to_string(),
            metadata: GenerationRequest {
                subject: "달빛 아래의 고양이".to_string(),
                ..Default::default()
            }
            .metadata()
            .to_json()
            .unwrap(),
        };
        let rendered = render_json(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        // Nested object, not an escaped JSON string
        assert!(value["metadata"].is_object());
        assert_eq!(value["metadata"]["korean_prompt"], "달빛 아래의 고양이");
        assert_eq!(value["prompts_batch"], "a cat under the moonlight");
    }

    #[test]
    fn test_flag_key_overrides_config() {
        let config = Config::default();
        let mut args = args_for("한복을 입은 여성");
        args.gemini_key = Some("flag-key".to_string());
        let request = build_request(&args, &config).unwrap();
        assert_eq!(request.credentials.gemini.as_deref(), Some("flag-key"));
    }
}
