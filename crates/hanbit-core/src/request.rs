//! Request model: the per-run value bundle and its closed option axes.
//!
//! Every creative axis the UI exposes is a closed enum here. Axes that
//! support delegation to the model ("auto" in the UI) are carried as
//! `Option<Axis>` — `None` means "let the model choose". The string "auto"
//! only exists at the parse boundary, never inside the core.

use crate::error::EnhanceError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Bounds enforced by [`GenerationRequest::validate`].
pub const MIN_VARIATIONS: u32 = 1;
pub const MAX_VARIATIONS: u32 = 10;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// The three supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Google Gemini (GenerateContent API)
    Gemini,
    /// OpenAI (Chat Completions API)
    OpenAi,
    /// Anthropic (Messages API)
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = EnhanceError;

    /// Accepts the canonical names plus the product names the original UI
    /// used ("chatGPT", "Claude").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" | "chatgpt" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            _ => Err(EnhanceError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// API keys per provider. Only the key for the *selected* provider is ever
/// required or validated.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub gemini: Option<String>,
    pub openai: Option<String>,
    pub anthropic: Option<String>,
}

impl ProviderCredentials {
    /// Return the credential for a provider, treating blank strings as absent.
    pub fn get(&self, provider: ProviderKind) -> Option<&str> {
        let key = match provider {
            ProviderKind::Gemini => self.gemini.as_deref(),
            ProviderKind::OpenAi => self.openai.as_deref(),
            ProviderKind::Anthropic => self.anthropic.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Target language for the enhanced prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    English,
    Chinese,
    ChineseTaiwan,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Chinese => "Chinese",
            TargetLanguage::ChineseTaiwan => "Chinese-Taiwan",
        }
    }

    /// ISO code used by the translation service.
    pub fn iso_code(&self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Chinese => "zh-CN",
            TargetLanguage::ChineseTaiwan => "zh-TW",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "English" => Ok(TargetLanguage::English),
            "Chinese" => Ok(TargetLanguage::Chinese),
            "Chinese-Taiwan" => Ok(TargetLanguage::ChineseTaiwan),
            _ => Err(format!("unknown target language: {s}")),
        }
    }
}

/// Overall image style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Photorealistic,
    Hyperrealistic,
    Cinematic,
    FilmNoir,
    Anime90s,
    Manga,
    Ghibli,
    VintagePhotography,
    FantasyArt,
    SciFiConceptArt,
    Cyberpunk,
    Steampunk,
    Watercolor,
    OilPainting,
    Impressionism,
    PopArt,
    Minimalist,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Photorealistic => "photorealistic",
            Style::Hyperrealistic => "hyperrealistic",
            Style::Cinematic => "cinematic",
            Style::FilmNoir => "film noir",
            Style::Anime90s => "anime (90s style)",
            Style::Manga => "manga",
            Style::Ghibli => "ghibli style",
            Style::VintagePhotography => "vintage photography",
            Style::FantasyArt => "fantasy art",
            Style::SciFiConceptArt => "sci-fi concept art",
            Style::Cyberpunk => "cyberpunk",
            Style::Steampunk => "steampunk",
            Style::Watercolor => "watercolor",
            Style::OilPainting => "oil painting",
            Style::Impressionism => "impressionism",
            Style::PopArt => "pop art",
            Style::Minimalist => "minimalist",
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STYLES
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown style: {s}"))
    }
}

const ALL_STYLES: &[Style] = &[
    Style::Photorealistic,
    Style::Hyperrealistic,
    Style::Cinematic,
    Style::FilmNoir,
    Style::Anime90s,
    Style::Manga,
    Style::Ghibli,
    Style::VintagePhotography,
    Style::FantasyArt,
    Style::SciFiConceptArt,
    Style::Cyberpunk,
    Style::Steampunk,
    Style::Watercolor,
    Style::OilPainting,
    Style::Impressionism,
    Style::PopArt,
    Style::Minimalist,
];

/// Subject ethnicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ethnicity {
    African,
    AfroAmerican,
    Arab,
    Caucasian,
    Chinese,
    Hispanic,
    Indian,
    Japanese,
    Korean,
    NativeAmerican,
    SoutheastAsian,
}

impl Ethnicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ethnicity::African => "African",
            Ethnicity::AfroAmerican => "Afro-American",
            Ethnicity::Arab => "Arab",
            Ethnicity::Caucasian => "Caucasian",
            Ethnicity::Chinese => "Chinese",
            Ethnicity::Hispanic => "Hispanic",
            Ethnicity::Indian => "Indian",
            Ethnicity::Japanese => "Japanese",
            Ethnicity::Korean => "Korean",
            Ethnicity::NativeAmerican => "Native American",
            Ethnicity::SoutheastAsian => "Southeast Asian",
        }
    }
}

impl FromStr for Ethnicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: &[Ethnicity] = &[
            Ethnicity::African,
            Ethnicity::AfroAmerican,
            Ethnicity::Arab,
            Ethnicity::Caucasian,
            Ethnicity::Chinese,
            Ethnicity::Hispanic,
            Ethnicity::Indian,
            Ethnicity::Japanese,
            Ethnicity::Korean,
            Ethnicity::NativeAmerican,
            Ethnicity::SoutheastAsian,
        ];
        ALL.iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown ethnicity: {s}"))
    }
}

/// Subject age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRange {
    Teens,
    Twenties,
    Thirties,
    Forties,
    FiftiesPlus,
}

impl AgeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRange::Teens => "10s",
            AgeRange::Twenties => "20s",
            AgeRange::Thirties => "30s",
            AgeRange::Forties => "40s",
            AgeRange::FiftiesPlus => "50s+",
        }
    }
}

impl FromStr for AgeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "10s" => Ok(AgeRange::Teens),
            "20s" => Ok(AgeRange::Twenties),
            "30s" => Ok(AgeRange::Thirties),
            "40s" => Ok(AgeRange::Forties),
            "50s+" => Ok(AgeRange::FiftiesPlus),
            _ => Err(format!("unknown age range: {s}")),
        }
    }
}

/// Subject gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Person,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Person => "Person",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Person" => Ok(Gender::Person),
            _ => Err(format!("unknown gender: {s}")),
        }
    }
}

/// Camera angle / shot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAngle {
    EyeLevel,
    LowAngle,
    HighAngle,
    Dutch,
    OverTheShoulder,
    PointOfView,
    CloseUp,
    MediumShot,
    LongShot,
    CraneShot,
    DroneShot,
    BirdsEye,
}

impl CameraAngle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraAngle::EyeLevel => "eye-level shot",
            CameraAngle::LowAngle => "low-angle shot",
            CameraAngle::HighAngle => "high-angle shot",
            CameraAngle::Dutch => "dutch angle",
            CameraAngle::OverTheShoulder => "over-the-shoulder shot",
            CameraAngle::PointOfView => "point-of-view (POV)",
            CameraAngle::CloseUp => "close-up",
            CameraAngle::MediumShot => "medium shot",
            CameraAngle::LongShot => "long shot",
            CameraAngle::CraneShot => "crane shot",
            CameraAngle::DroneShot => "drone shot",
            CameraAngle::BirdsEye => "bird-eye view",
        }
    }
}

impl FromStr for CameraAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: &[CameraAngle] = &[
            CameraAngle::EyeLevel,
            CameraAngle::LowAngle,
            CameraAngle::HighAngle,
            CameraAngle::Dutch,
            CameraAngle::OverTheShoulder,
            CameraAngle::PointOfView,
            CameraAngle::CloseUp,
            CameraAngle::MediumShot,
            CameraAngle::LongShot,
            CameraAngle::CraneShot,
            CameraAngle::DroneShot,
            CameraAngle::BirdsEye,
        ];
        ALL.iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown camera angle: {s}"))
    }
}

/// Camera lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lens {
    WideAngle,
    UltraWideAngle,
    Standard50,
    Telephoto,
    SuperTelephoto,
    Macro,
    Prime,
    Zoom,
    Fisheye,
    TiltShift,
}

impl Lens {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lens::WideAngle => "wide-angle",
            Lens::UltraWideAngle => "ultra-wide-angle",
            Lens::Standard50 => "standard (50mm)",
            Lens::Telephoto => "telephoto",
            Lens::SuperTelephoto => "super-telephoto",
            Lens::Macro => "macro",
            Lens::Prime => "prime lens",
            Lens::Zoom => "zoom lens",
            Lens::Fisheye => "fisheye",
            Lens::TiltShift => "tilt-shift",
        }
    }
}

impl FromStr for Lens {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: &[Lens] = &[
            Lens::WideAngle,
            Lens::UltraWideAngle,
            Lens::Standard50,
            Lens::Telephoto,
            Lens::SuperTelephoto,
            Lens::Macro,
            Lens::Prime,
            Lens::Zoom,
            Lens::Fisheye,
            Lens::TiltShift,
        ];
        ALL.iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown lens: {s}"))
    }
}

/// Lighting setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lighting {
    Natural,
    GoldenHour,
    BlueHour,
    MiddaySun,
    Overcast,
    Studio,
    Softbox,
    RingLight,
    RimLight,
    Backlight,
    Dramatic,
    Chiaroscuro,
    NeonLights,
    Candlelight,
}

impl Lighting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lighting::Natural => "natural light",
            Lighting::GoldenHour => "golden hour",
            Lighting::BlueHour => "blue hour",
            Lighting::MiddaySun => "midday sun",
            Lighting::Overcast => "overcast",
            Lighting::Studio => "studio light",
            Lighting::Softbox => "softbox",
            Lighting::RingLight => "ring light",
            Lighting::RimLight => "rim light",
            Lighting::Backlight => "backlight",
            Lighting::Dramatic => "dramatic light",
            Lighting::Chiaroscuro => "chiaroscuro",
            Lighting::NeonLights => "neon lights",
            Lighting::Candlelight => "candlelight",
        }
    }
}

impl FromStr for Lighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: &[Lighting] = &[
            Lighting::Natural,
            Lighting::GoldenHour,
            Lighting::BlueHour,
            Lighting::MiddaySun,
            Lighting::Overcast,
            Lighting::Studio,
            Lighting::Softbox,
            Lighting::RingLight,
            Lighting::RimLight,
            Lighting::Backlight,
            Lighting::Dramatic,
            Lighting::Chiaroscuro,
            Lighting::NeonLights,
            Lighting::Candlelight,
        ];
        ALL.iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown lighting: {s}"))
    }
}

/// Parse an axis value that supports delegation: "auto" maps to `None`.
pub fn parse_axis<T: FromStr<Err = String>>(s: &str) -> Result<Option<T>, String> {
    if s == "auto" {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Immutable value bundling every user-chosen axis for one run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Korean description of subject 1 (required, may be multi-line)
    pub subject: String,
    /// Korean description of subject 2; blank means single-subject scene
    pub subject2: String,
    /// How the two subjects relate in the scene
    pub composition: String,
    /// Language of the enhanced prompt
    pub language: TargetLanguage,
    /// Which LLM service to call
    pub provider: ProviderKind,
    /// Provider-specific model identifier
    pub model: String,
    /// Overall style; `None` delegates the choice to the model
    pub style: Option<Style>,
    /// Free-text artist or art-movement keywords to emulate
    pub artist_style: String,
    /// Subject ethnicity; `None` delegates the choice to the model
    pub ethnicity: Option<Ethnicity>,
    /// Subject age bracket
    pub age: AgeRange,
    /// Subject gender
    pub gender: Gender,
    /// Camera angle; `None` delegates the choice to the model
    pub camera_angle: Option<CameraAngle>,
    /// Lens; `None` delegates the choice to the model
    pub lens: Option<Lens>,
    /// Lighting; `None` delegates the choice to the model
    pub lighting: Option<Lighting>,
    /// Number of independent prompt variants to generate
    pub variations: u32,
    /// LLM sampling temperature
    pub temperature: f32,
    /// Whether to derive a negative prompt per variant via the LLM
    pub intelligent_negative: bool,
    /// User-supplied negative prompt, prepended to the final negative
    pub negative_prompt: String,
    /// Provider API keys
    pub credentials: ProviderCredentials,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            subject: String::new(),
            subject2: String::new(),
            composition: "Subject 1 is the main focus.".to_string(),
            language: TargetLanguage::English,
            provider: ProviderKind::Gemini,
            model: "gemini-1.5-flash-latest".to_string(),
            style: None,
            artist_style: String::new(),
            ethnicity: None,
            age: AgeRange::Twenties,
            gender: Gender::Female,
            camera_angle: None,
            lens: None,
            lighting: None,
            variations: 1,
            temperature: 0.7,
            intelligent_negative: false,
            negative_prompt: "blurry, distortion, cartoon".to_string(),
            credentials: ProviderCredentials::default(),
        }
    }
}

impl GenerationRequest {
    /// Whether this request describes a two-subject composed scene.
    pub fn is_composed_scene(&self) -> bool {
        !self.subject2.trim().is_empty()
    }

    /// Check the request invariants.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if self.subject.trim().is_empty() {
            return Err(EnhanceError::InvalidRequest(
                "subject description must not be blank".to_string(),
            ));
        }
        if !(MIN_VARIATIONS..=MAX_VARIATIONS).contains(&self.variations) {
            return Err(EnhanceError::InvalidRequest(format!(
                "variations must be between {MIN_VARIATIONS} and {MAX_VARIATIONS}, got {}",
                self.variations
            )));
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(EnhanceError::InvalidRequest(format!(
                "temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Build the reproducibility metadata record for this request.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            korean_prompt: self.subject.clone(),
            target_language: self.language.as_str().to_string(),
            llm_provider: self.provider.as_str().to_string(),
            model_name: self.model.clone(),
            subject_2_prompt: self.subject2.clone(),
            composition_description: self.composition.clone(),
            style: self.style.map(|v| v.as_str()).unwrap_or("auto").to_string(),
            artist_style_keywords: self.artist_style.clone(),
            ethnicity: self
                .ethnicity
                .map(|v| v.as_str())
                .unwrap_or("auto")
                .to_string(),
            age: self.age.as_str().to_string(),
            gender: self.gender.as_str().to_string(),
            camera_angle: self
                .camera_angle
                .map(|v| v.as_str())
                .unwrap_or("auto")
                .to_string(),
            lens: self.lens.map(|v| v.as_str()).unwrap_or("auto").to_string(),
            lighting: self
                .lighting
                .map(|v| v.as_str())
                .unwrap_or("auto")
                .to_string(),
            num_variations: self.variations,
            temperature: self.temperature,
            generate_intelligent_negative: self.intelligent_negative,
        }
    }
}

/// Structured record of every input axis used for a run.
///
/// Serialized as pretty JSON for the metadata output. Field order is the
/// stable key order of the serialization; credentials are deliberately not
/// part of the record.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub korean_prompt: String,
    pub target_language: String,
    pub llm_provider: String,
    pub model_name: String,
    pub subject_2_prompt: String,
    pub composition_description: String,
    pub style: String,
    pub artist_style_keywords: String,
    pub ethnicity: String,
    pub age: String,
    pub gender: String,
    pub camera_angle: String,
    pub lens: String,
    pub lighting: String,
    pub num_variations: u32,
    pub temperature: f32,
    pub generate_intelligent_negative: bool,
}

impl Metadata {
    /// Serialize to human-readable JSON (non-ASCII preserved as-is).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
