//! Error types for the Hanbit prompt enhancement pipeline.
//!
//! Two distinct worlds: `EnhanceError` covers the fatal conditions that abort
//! a whole run (missing credential, invalid request, config problems), while
//! `LlmError` covers per-call provider failures. An `LlmError` never crosses
//! the router boundary — it is logged and folded into an absent
//! [`CallOutcome`](crate::llm::CallOutcome) so the orchestrator can fall back.

use crate::request::ProviderKind;
use thiserror::Error;

/// Top-level error type for Hanbit operations.
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// The selected provider has no API key configured.
    ///
    /// Raised at router construction time. Credentials for unselected
    /// providers are never validated.
    #[error("Missing API key for provider '{provider}'. Set it in the config file or pass it explicitly.")]
    MissingCredential { provider: ProviderKind },

    /// A provider identifier outside the supported set.
    ///
    /// Only reachable at the string-parse boundary; once a `ProviderKind`
    /// exists, dispatch is exhaustive.
    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    /// Request field validation failed (blank subject, out-of-range
    /// temperature or variation count).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization errors (metadata output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize configuration back to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-call provider failure, contained inside the adapter layer.
///
/// Carried only for diagnostics: callers beyond the router see presence or
/// absence of a result, never the reason.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The HTTP request itself failed (connection, DNS, timeout).
    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    /// The provider answered with a non-success status.
    #[error("{provider} HTTP {status}: {message}")]
    Http {
        provider: String,
        status: u16,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to parse {provider} response: {message}")]
    MalformedResponse { provider: String, message: String },

    /// The provider returned a well-formed response with no text content.
    #[error("{provider} returned an empty response")]
    Empty { provider: String },
}

/// Convenience type alias for Hanbit results.
pub type Result<T> = std::result::Result<T, EnhanceError>;
