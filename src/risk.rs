//! Overall health-risk aggregation
//!
//! Consumes a percentile map and nothing else: the score is the average
//! of the percentiles that are present, the risk is its complement, and
//! the level buckets the score with two fixed thresholds.

use tracing::debug;

use crate::percentile::round1;
use crate::types::{HealthRisk, PercentileResult, RiskLevel};

/// Score at or above which standing is classified `Peak`
pub const PEAK_SCORE_THRESHOLD: f64 = 66.67;
/// Score at or above which standing is classified `Progressing`
pub const PROGRESSING_SCORE_THRESHOLD: f64 = 33.34;

/// Aggregate a percentile map into an overall health-risk assessment
///
/// Only assessed metrics contribute. An empty map yields a defined
/// result: score 0, the lowest tier, risk 100 — not an error.
/// `score + average_risk == 100` for every input.
pub fn assess_risk(percentiles: &PercentileResult) -> HealthRisk {
    let values: Vec<f64> = percentiles.values().collect();
    let score = if values.is_empty() {
        0.0
    } else {
        round1(values.iter().sum::<f64>() / values.len() as f64)
    };

    debug!(assessed = values.len(), score, "assessed overall risk");

    HealthRisk {
        score,
        average_risk: round1(100.0 - score),
        level: classify_score(score),
    }
}

/// Bucket a score into its risk level
pub fn classify_score(score: f64) -> RiskLevel {
    if score >= PEAK_SCORE_THRESHOLD {
        RiskLevel::Peak
    } else if score >= PROGRESSING_SCORE_THRESHOLD {
        RiskLevel::Progressing
    } else {
        RiskLevel::Starting
    }
}
