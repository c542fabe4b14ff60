//! Tier selection and metrics orchestration

use std::sync::Arc;

use axon_config::TieredRoutingConfig;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::RoutingError;
use crate::metrics::{MetricsSnapshot, TierMetrics};
use crate::scorer::ComplexityScorer;
use crate::{ComplexityResult, Tier};

/// Routes requests to a model tier by complexity score
///
/// Stateless decisions over stateful metrics: the router holds no lifecycle
/// state and accepts requests continuously from construction to disposal.
/// Build one per configuration snapshot and inject it where request
/// handlers need it; multiple routers coexist with fully independent state.
#[derive(Debug)]
pub struct TieredRouter {
    config: TieredRoutingConfig,
    scorer: ComplexityScorer,
    metrics: TierMetrics,
}

impl TieredRouter {
    /// Build a router around a configuration snapshot
    pub fn new(config: TieredRoutingConfig) -> Self {
        let scorer = ComplexityScorer::new(config.complexity_threshold);
        Self {
            config,
            scorer,
            metrics: TierMetrics::new(),
        }
    }

    /// Wrap the router in a shared handle for injection into handlers
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Score the request and select a model
    ///
    /// Never fails. With routing disabled the scorer is bypassed entirely
    /// and every request routes to the complex model with a zero score.
    /// `requested_model` only affects log verbosity: an overridden request
    /// logs at info level, everything else at debug.
    pub fn route(&self, messages: &[Value], requested_model: Option<&str>) -> (String, ComplexityResult) {
        if !self.config.enabled {
            let result = ComplexityResult {
                score: 0.0,
                factors: IndexMap::new(),
                tier: Tier::Complex,
                reasoning: "Tiered routing disabled".to_owned(),
            };
            self.metrics.record(&result);
            return (self.config.models.complex.clone(), result);
        }

        let result = self.scorer.score(messages);

        let selected = if result.is_simple() {
            self.config.models.simple.clone()
        } else {
            self.config.models.complex.clone()
        };

        self.metrics.record(&result);

        if self.config.logging.log_scores {
            tracing::debug!(
                score = result.score,
                factors = ?result.factors,
                tier = %result.tier,
                "request complexity scored"
            );
        }

        if self.config.logging.log_routing_decisions {
            match requested_model {
                Some(requested) if requested != selected => {
                    tracing::info!(
                        requested,
                        selected = %selected,
                        score = result.score,
                        tier = %result.tier,
                        reasoning = %result.reasoning,
                        "tier routing overrode requested model"
                    );
                }
                _ => {
                    tracing::debug!(
                        model = %selected,
                        score = result.score,
                        tier = %result.tier,
                        "tier routing decision"
                    );
                }
            }
        }

        (selected, result)
    }

    /// Note a caller-driven retry against the complex tier
    ///
    /// The router has no visibility into the downstream model call; the
    /// caller invokes this after a failed simple-tier request before
    /// retrying with `model_for_tier("complex")`.
    pub fn record_fallback(&self) {
        self.metrics.record_fallback();
        tracing::warn!(
            model = %self.config.models.complex,
            "simple-tier request failed; falling back to complex tier"
        );
    }

    /// Current metrics snapshot
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Zero the metrics; configuration is untouched
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Look up the model bound to a tier name
    ///
    /// The sole checked error in the router: any tier name other than
    /// "simple" or "complex" is rejected.
    pub fn model_for_tier(&self, tier: &str) -> Result<&str, RoutingError> {
        match tier.parse::<Tier>()? {
            Tier::Simple => Ok(&self.config.models.simple),
            Tier::Complex => Ok(&self.config.models.complex),
        }
    }

    /// Whether a failed call on the given tier should retry on the complex
    /// tier
    pub fn should_fallback(&self, tier: &str) -> bool {
        tier == "simple" && self.config.fallback_to_complex
    }

    /// Whether tiered routing is enabled
    pub const fn enabled(&self) -> bool {
        self.config.enabled
    }
}
