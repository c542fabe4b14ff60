//! Tiered model complexity routing for Axon
//!
//! Scores each chat request on a 0-10 complexity scale from five weighted
//! heuristic factors, then routes it to a "simple" (cheap) or "complex"
//! (capable) model tier. Pure heuristics, no ML pipeline: sub-millisecond
//! scoring dominated by regex matching.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::cast_precision_loss)]

pub mod error;
pub mod metrics;
pub mod router;
pub mod scorer;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

pub use error::RoutingError;
pub use metrics::{MetricsSnapshot, TierMetrics};
pub use router::TieredRouter;
pub use scorer::ComplexityScorer;

/// One of the two model-selection buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Low-complexity requests, served by the cheap model
    Simple,
    /// High-complexity requests, served by the capable model
    Complex,
}

impl Tier {
    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "complex" => Ok(Self::Complex),
            other => Err(RoutingError::InvalidTier { tier: other.to_owned() }),
        }
    }
}

/// Outcome of one scoring operation
///
/// A value object: created fresh per `score()` call, owned by the caller,
/// no shared state.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexityResult {
    /// Overall complexity, clamped to [0, 10], rounded to 2 decimals
    pub score: f64,
    /// Per-factor breakdown, each in [0, 3], rounded to 2 decimals
    pub factors: IndexMap<String, f64>,
    /// Selected tier
    pub tier: Tier,
    /// Human-readable explanation; never empty
    pub reasoning: String,
}

impl ComplexityResult {
    /// Whether the request routed to the simple tier
    pub fn is_simple(&self) -> bool {
        self.tier == Tier::Simple
    }

    /// Whether the request routed to the complex tier
    pub fn is_complex(&self) -> bool {
        self.tier == Tier::Complex
    }
}
