//! Routing-specific error types

use thiserror::Error;

/// Errors that can occur during tiered model routing
///
/// Routing itself never fails; the only checked condition is a tier lookup
/// with an unknown tier name.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Tier name other than "simple" or "complex"
    #[error("invalid tier: {tier} (expected \"simple\" or \"complex\")")]
    InvalidTier { tier: String },
}
