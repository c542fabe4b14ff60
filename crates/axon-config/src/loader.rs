use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, or TOML parsing fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion or TOML parsing
    /// fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate();

        Ok(config)
    }

    /// Check tier-routing fields for degenerate values
    ///
    /// Out-of-domain values warn but never fail: an out-of-range threshold
    /// biases tier selection deterministically and empty model names simply
    /// select an empty identifier. Routing semantics must not change here.
    pub fn validate(&self) {
        let routing = &self.llm.tiered_routing;

        if !(0.0..=10.0).contains(&routing.complexity_threshold) {
            tracing::warn!(
                threshold = routing.complexity_threshold,
                "complexity_threshold outside [0, 10]; tier selection will be one-sided"
            );
        }

        if routing.models.simple.is_empty() {
            tracing::warn!("tiered_routing.models.simple is empty");
        }

        if routing.models.complex.is_empty() {
            tracing::warn!("tiered_routing.models.complex is empty");
        }
    }
}
