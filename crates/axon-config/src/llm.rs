//! Tiered model routing configuration

use serde::Deserialize;

/// Top-level LLM configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Tiered complexity routing configuration
    #[serde(default)]
    pub tiered_routing: TieredRoutingConfig,
}

/// Configuration snapshot for the tiered complexity router
///
/// Constructed once at startup and immutable thereafter. Callers needing
/// different behavior build a new router around a new snapshot rather than
/// mutating fields in place.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TieredRoutingConfig {
    /// Master switch; when false every request routes to the complex model
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Decision boundary on the 0-10 complexity scale; scores below it
    /// route to the simple tier, scores at or above it to the complex tier
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: f64,
    /// Model identifiers for each tier
    #[serde(default)]
    pub models: TierModels,
    /// Whether a failed simple-tier call should be retried on the complex tier
    #[serde(default = "default_fallback_to_complex")]
    pub fallback_to_complex: bool,
    /// Observability verbosity; no effect on routing behavior
    #[serde(default)]
    pub logging: TierLogging,
}

impl Default for TieredRoutingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            complexity_threshold: default_complexity_threshold(),
            models: TierModels::default(),
            fallback_to_complex: default_fallback_to_complex(),
            logging: TierLogging::default(),
        }
    }
}

/// Model identifiers bound to each tier
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierModels {
    /// Model serving low-complexity requests
    #[serde(default = "default_simple_model")]
    pub simple: String,
    /// Model serving high-complexity requests
    #[serde(default = "default_complex_model")]
    pub complex: String,
}

impl Default for TierModels {
    fn default() -> Self {
        Self {
            simple: default_simple_model(),
            complex: default_complex_model(),
        }
    }
}

/// Logging verbosity for the router
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierLogging {
    /// Emit per-request score breakdowns at debug level
    #[serde(default = "default_log_flag")]
    pub log_scores: bool,
    /// Emit routing decisions (info when overriding the requested model)
    #[serde(default = "default_log_flag")]
    pub log_routing_decisions: bool,
}

impl Default for TierLogging {
    fn default() -> Self {
        Self {
            log_scores: default_log_flag(),
            log_routing_decisions: default_log_flag(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_complexity_threshold() -> f64 {
    3.0
}

const fn default_fallback_to_complex() -> bool {
    true
}

const fn default_log_flag() -> bool {
    true
}

fn default_simple_model() -> String {
    "gemma2:2b".to_owned()
}

fn default_complex_model() -> String {
    "mistral:7b-instruct".to_owned()
}
