//! Multi-provider LLM dispatch.
//!
//! A provider abstraction over three text-generation backends (Gemini,
//! OpenAI, Anthropic) and a router that selects exactly one per run and
//! contains every per-call failure behind a present/absent outcome.

pub(crate) mod anthropic;
pub(crate) mod gemini;
pub(crate) mod openai;
pub(crate) mod provider;

pub use provider::{resolve_env_var, CallOutcome, LlmProvider, ProviderRouter, TextRequest};
