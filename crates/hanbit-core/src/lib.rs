//! Hanbit Core - Korean prompt enhancement for image generation models.
//!
//! Hanbit takes a Korean-language description of a subject (optionally a
//! second subject and a composition description), builds a natural-language
//! instruction, sends it to one of three LLM providers, and returns an
//! enhanced image-generation prompt batch, a matching negative prompt, and a
//! metadata record for reproducibility.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest → compose → ProviderRouter → provider adapter
//!                                    │ (absent outcome)
//!                                    └→ fallback (translate + template)
//! ```
//!
//! Per-call provider failures never escape the router; they degrade to a
//! deterministic fallback prompt. Only an invalid request or a missing
//! credential for the selected provider aborts a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hanbit_core::{Enhancer, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> hanbit_core::Result<()> {
//!     let request = GenerationRequest {
//!         subject: "한복을 입은 여성".to_string(),
//!         ..Default::default()
//!     };
//!     let enhancer = Enhancer::new(&request)?;
//!     let output = enhancer.run(&request).await?;
//!     println!("{}", output.prompts_batch);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod compose;
pub mod config;
pub mod enhance;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod request;
pub mod translate;

// Re-exports for convenient access
pub use config::Config;
pub use enhance::{Enhancer, EnhanceOutput, DEFAULT_NEGATIVES};
pub use error::{ConfigError, EnhanceError, LlmError, Result};
pub use llm::{CallOutcome, LlmProvider, ProviderRouter, TextRequest};
pub use request::{
    AgeRange, CameraAngle, Ethnicity, Gender, GenerationRequest, Lens, Lighting, Metadata,
    ProviderCredentials, ProviderKind, Style, TargetLanguage,
};
pub use translate::{GoogleTranslator, Translator};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
