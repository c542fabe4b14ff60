#![allow(clippy::must_use_candidate)]

mod env;
pub mod llm;
mod loader;
pub mod source;

use serde::Deserialize;

pub use llm::*;
pub use source::{JsonSettings, SettingsSource};

/// Top-level Axon configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// LLM routing configuration
    #[serde(default)]
    pub llm: LlmConfig,
}
