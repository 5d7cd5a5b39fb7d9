//! Input and output types for the percentile and risk engine
//!
//! All public types are closed and explicitly typed: the set of metric
//! keys that may appear in a result is fixed by the struct definitions,
//! and absent metrics are `None`, serialized as absent JSON keys.
//! Field renames follow the camelCase wire document consumed by callers.

use serde::{Deserialize, Serialize};

// ============================================================================
// Subject Profile
// ============================================================================

/// Biological sex for reference-population lookup
///
/// `Other` resolves to the midpoint of the male and female distribution
/// parameters for the matching age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// Subject demographics for a single computation, immutable per call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProfile {
    /// Age in whole years
    pub age_years: u32,
    /// Biological sex for reference lookup
    pub sex: Sex,
    /// Body weight in pounds; strength readings are ranked relative to it
    pub body_weight: f64,
}

// ============================================================================
// Metric Readings
// ============================================================================

/// Strength exercise with reference-population coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthExercise {
    Squat,
    Bench,
}

/// How the strength reading was measured
///
/// Tagged with `type` on the wire (`"oneRepMax"` or `"weightReps"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StrengthMeasurement {
    /// Directly measured one-rep-max weight in pounds
    #[serde(rename_all = "camelCase")]
    OneRepMax { one_rep_max: f64 },
    /// Sub-maximal set from which one-rep-max is estimated
    #[serde(rename_all = "camelCase")]
    WeightReps { weight: f64, reps: u32 },
}

/// Strength training reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthTraining {
    pub exercise: StrengthExercise,
    #[serde(flatten)]
    pub measurement: StrengthMeasurement,
}

/// Cholesterol panel reading, mg/dL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cholesterol {
    pub total: f64,
    pub hdl: f64,
}

/// Single-night sleep reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sleep {
    /// Time asleep in hours, 0-24
    pub duration: f64,
    /// Fraction of time in bed spent asleep, 0-1
    pub efficiency: f64,
    /// REM fraction of sleep, 0-1
    pub rem: f64,
    /// Deep-sleep fraction of sleep, 0-1
    pub deep: f64,
}

/// One batch of raw biometric readings; every metric is optional
///
/// An absent metric produces no percentile entry — "not assessed", not
/// "assessed at zero".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricReadings {
    /// 1-mile time in seconds (numeric only; MM:SS parsing is a caller concern)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardio_fitness: Option<f64>,
    /// Resting heart rate, beats per minute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_training: Option<StrengthTraining>,
    /// HbA1c percentage, domain 3.5-70
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<Cholesterol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<Sleep>,
}

// ============================================================================
// Results
// ============================================================================

/// Percentile rank per assessed metric, each in [0, 100]
///
/// Direction-adjusted so a higher percentile always means healthier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PercentileResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardio_fitness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f64>,
}

impl PercentileResult {
    /// Iterate over the percentiles that are present
    pub fn values(&self) -> impl Iterator<Item = f64> {
        [
            self.cardio_fitness,
            self.heart_rate,
            self.strength,
            self.blood_sugar,
            self.cholesterol,
            self.sleep,
        ]
        .into_iter()
        .flatten()
    }

    /// True when no metric was assessed
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }
}

/// Derived numeric values not directly supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatedValues {
    /// Measured or estimated one-rep-max in pounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_rep_max: Option<f64>,
    /// Sleep composite score, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_score: Option<f64>,
}

/// Three-tier overall standing, bucketed by score thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Starting,
    Progressing,
    Peak,
}

impl RiskLevel {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Starting => "Starting Your Health Journey - Great Potential for Growth",
            RiskLevel::Progressing => "Making Great Progress - Keep Moving Forward",
            RiskLevel::Peak => "Wellness Peak - Sustaining Your Health",
        }
    }
}

/// Aggregate health-risk assessment built from a percentile map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRisk {
    /// Average percentile standing across assessed metrics, 0-100
    pub score: f64,
    /// Complement of `score`: `100 - score` for every input
    pub average_risk: f64,
    pub level: RiskLevel,
}
