//! In-memory routing metrics
//!
//! Process-lifetime counters owned by one router. A single mutex guards
//! each record-and-average update so the read-modify-write of counter plus
//! running sum is atomic as a unit. Never persisted.

use std::sync::Mutex;

use serde::Serialize;

use crate::{ComplexityResult, Tier};

#[derive(Debug, Default)]
struct MetricsInner {
    simple_requests: u64,
    complex_requests: u64,
    total_requests: u64,
    score_sum_simple: f64,
    score_sum_complex: f64,
    fallback_count: u64,
}

/// Cumulative tier-routing counters
#[derive(Debug, Default)]
pub struct TierMetrics {
    inner: Mutex<MetricsInner>,
}

impl TierMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one routing outcome
    pub fn record(&self, result: &ComplexityResult) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        inner.total_requests += 1;
        match result.tier {
            Tier::Simple => {
                inner.simple_requests += 1;
                inner.score_sum_simple += result.score;
            }
            Tier::Complex => {
                inner.complex_requests += 1;
                inner.score_sum_complex += result.score;
            }
        }
    }

    /// Record one caller-driven fallback to the complex tier
    pub fn record_fallback(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.fallback_count += 1;
    }

    /// Take a point-in-time snapshot for reporting
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let avg = |sum: f64, count: u64| if count == 0 { 0.0 } else { round2(sum / count as f64) };

        let simple_tier_percentage = if inner.total_requests == 0 {
            0.0
        } else {
            round1((inner.simple_requests as f64 / inner.total_requests as f64) * 100.0)
        };

        MetricsSnapshot {
            simple_tier_requests: inner.simple_requests,
            complex_tier_requests: inner.complex_requests,
            total_requests: inner.total_requests,
            avg_simple_score: avg(inner.score_sum_simple, inner.simple_requests),
            avg_complex_score: avg(inner.score_sum_complex, inner.complex_requests),
            fallback_count: inner.fallback_count,
            simple_tier_percentage,
        }
    }

    /// Zero all counters
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *inner = MetricsInner::default();
    }
}

/// Flat, JSON-serializable metrics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Requests routed to the simple tier
    pub simple_tier_requests: u64,
    /// Requests routed to the complex tier
    pub complex_tier_requests: u64,
    /// All routed requests
    pub total_requests: u64,
    /// Mean score of simple-tier requests, 2 decimals
    pub avg_simple_score: f64,
    /// Mean score of complex-tier requests, 2 decimals
    pub avg_complex_score: f64,
    /// Caller-reported fallbacks to the complex tier
    pub fallback_count: u64,
    /// Share of requests on the simple tier, percent, 1 decimal
    pub simple_tier_percentage: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
