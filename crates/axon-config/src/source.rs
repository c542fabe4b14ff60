//! Dotted-key settings abstraction
//!
//! The router reads its snapshot from whatever configuration registry the
//! host application uses. The only capability it needs is "get a value by
//! dotted key"; defaults apply per field when a key is absent or has the
//! wrong type.

use serde_json::Value;

use crate::llm::{TierLogging, TierModels, TieredRoutingConfig};

/// A read-only source of configuration values addressed by dotted key
pub trait SettingsSource {
    /// Look up a value by dotted key, e.g. `llm.tiered_routing.enabled`
    fn get(&self, key: &str) -> Option<Value>;
}

/// Settings source backed by a JSON value tree
#[derive(Debug, Clone)]
pub struct JsonSettings {
    root: Value,
}

impl JsonSettings {
    /// Wrap a JSON tree as a settings source
    pub const fn new(root: Value) -> Self {
        Self { root }
    }
}

impl SettingsSource for JsonSettings {
    fn get(&self, key: &str) -> Option<Value> {
        let mut node = &self.root;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        Some(node.clone())
    }
}

impl TieredRoutingConfig {
    /// Build a routing config snapshot from a dotted-key settings source
    ///
    /// Each field falls back to its documented default when the key is
    /// absent or not of the expected type.
    pub fn from_source(source: &dyn SettingsSource) -> Self {
        let defaults = Self::default();

        Self {
            enabled: bool_at(source, "llm.tiered_routing.enabled").unwrap_or(defaults.enabled),
            complexity_threshold: f64_at(source, "llm.tiered_routing.complexity_threshold")
                .unwrap_or(defaults.complexity_threshold),
            models: TierModels {
                simple: string_at(source, "llm.tiered_routing.models.simple").unwrap_or(defaults.models.simple),
                complex: string_at(source, "llm.tiered_routing.models.complex").unwrap_or(defaults.models.complex),
            },
            fallback_to_complex: bool_at(source, "llm.tiered_routing.fallback_to_complex")
                .unwrap_or(defaults.fallback_to_complex),
            logging: TierLogging {
                log_scores: bool_at(source, "llm.tiered_routing.logging.log_scores")
                    .unwrap_or(defaults.logging.log_scores),
                log_routing_decisions: bool_at(source, "llm.tiered_routing.logging.log_routing_decisions")
                    .unwrap_or(defaults.logging.log_routing_decisions),
            },
        }
    }
}

fn bool_at(source: &dyn SettingsSource, key: &str) -> Option<bool> {
    source.get(key)?.as_bool()
}

fn f64_at(source: &dyn SettingsSource, key: &str) -> Option<f64> {
    source.get(key)?.as_f64()
}

fn string_at(source: &dyn SettingsSource, key: &str) -> Option<String> {
    source.get(key)?.as_str().map(str::to_owned)
}
