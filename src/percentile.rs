//! Percentile computation engine
//!
//! Converts a subject profile plus raw metric readings into per-metric
//! percentile ranks and derived calculated values. Each metric is
//! assessed independently: validate the reading, look up the reference
//! distribution for the subject's age bracket and sex, and rank the
//! (possibly derived) value against it.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no side effects, no shared mutable state
//! 2. **Per-Metric Direction**: inversion for lower-is-better metrics
//!    happens at ranking time, never globally
//! 3. **Absence is Absence**: an unsupplied metric yields no entry,
//!    never a zero percentile

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EngineError;
use crate::reference::{self, ReferenceMetric};
use crate::types::{
    CalculatedValues, MetricReadings, PercentileResult, Sex, Sleep, StrengthMeasurement,
    SubjectProfile,
};
use crate::validation;

/// Target sleep duration for the composite score, hours
pub const SLEEP_TARGET_HOURS: f64 = 8.0;
/// REM fraction given full credit in the composite
pub const IDEAL_REM_FRACTION: f64 = 0.25;
/// Deep-sleep fraction given full credit in the composite
pub const IDEAL_DEEP_FRACTION: f64 = 0.20;

const SLEEP_WEIGHT_DURATION: f64 = 0.40;
const SLEEP_WEIGHT_EFFICIENCY: f64 = 0.30;
const SLEEP_WEIGHT_REM: f64 = 0.15;
const SLEEP_WEIGHT_DEEP: f64 = 0.15;

/// Percentiles plus the derived values they were computed from
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PercentileOutcome {
    pub percentiles: PercentileResult,
    pub calculated_values: CalculatedValues,
}

/// Derive age in whole years as of today (UTC)
pub fn derive_age(date_of_birth: NaiveDate) -> Result<u32, EngineError> {
    derive_age_as_of(date_of_birth, Utc::now().date_naive())
}

/// Derive age in whole years as of a given date
///
/// Calendar-year difference, minus one when the reference month/day
/// precedes the birth month/day. Future-dated input fails with
/// `InvalidDate`.
pub fn derive_age_as_of(date_of_birth: NaiveDate, today: NaiveDate) -> Result<u32, EngineError> {
    if date_of_birth > today {
        return Err(EngineError::InvalidDate(format!(
            "{date_of_birth} is in the future"
        )));
    }
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    Ok(age as u32)
}

impl SubjectProfile {
    /// Build a profile from a date of birth instead of a known age
    pub fn from_birth_date(
        date_of_birth: NaiveDate,
        sex: Sex,
        body_weight: f64,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            age_years: derive_age(date_of_birth)?,
            sex,
            body_weight,
        })
    }
}

/// Estimate one-rep-max from a sub-maximal set
///
/// Epley-style: `1RM = weight * (1 + (reps - 1) / 30)`. Reduces to the
/// lifted weight at a single rep and is monotonic in both arguments.
/// Rounded to one decimal like every other derived value.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    round1(weight * (1.0 + (reps.saturating_sub(1)) as f64 / 30.0))
}

/// Composite sleep score in [0, 100]
///
/// Weighted sum of four bounded partials: duration closeness to 8 h
/// (0.40), efficiency (0.30), REM-fraction closeness to 0.25 (0.15),
/// deep-fraction closeness to 0.20 (0.15). Closeness is
/// `1 - |x - ideal| / ideal`, clamped to [0, 1], so both shortfall and
/// excess reduce the partial.
pub fn sleep_score(sleep: &Sleep) -> f64 {
    let duration = closeness(sleep.duration, SLEEP_TARGET_HOURS);
    let efficiency = sleep.efficiency.clamp(0.0, 1.0);
    let rem = closeness(sleep.rem, IDEAL_REM_FRACTION);
    let deep = closeness(sleep.deep, IDEAL_DEEP_FRACTION);

    let composite = SLEEP_WEIGHT_DURATION * duration
        + SLEEP_WEIGHT_EFFICIENCY * efficiency
        + SLEEP_WEIGHT_REM * rem
        + SLEEP_WEIGHT_DEEP * deep;
    round1(composite * 100.0)
}

fn closeness(value: f64, ideal: f64) -> f64 {
    (1.0 - ((value - ideal) / ideal).abs()).clamp(0.0, 1.0)
}

/// Compute percentile ranks and calculated values for every present reading
///
/// Fails with `InvalidMetricRange` when any reading is outside its
/// documented domain, and with `UnsupportedDemographic` when the
/// subject's age has no reference bracket. No partial results are
/// produced on failure.
pub fn compute_percentiles(
    profile: &SubjectProfile,
    readings: &MetricReadings,
) -> Result<PercentileOutcome, EngineError> {
    validation::validate_readings(profile, readings)?;

    let mut percentiles = PercentileResult::default();
    let mut calculated_values = CalculatedValues::default();

    if let Some(seconds) = readings.cardio_fitness {
        percentiles.cardio_fitness = Some(rank(ReferenceMetric::CardioFitness, seconds, profile)?);
    }

    if let Some(bpm) = readings.heart_rate {
        percentiles.heart_rate = Some(rank(ReferenceMetric::RestingHeartRate, bpm, profile)?);
    }

    if let Some(strength) = &readings.strength_training {
        let one_rep_max = match strength.measurement {
            // Direct measurement passes through unchanged
            StrengthMeasurement::OneRepMax { one_rep_max } => one_rep_max,
            StrengthMeasurement::WeightReps { weight, reps } => estimate_one_rep_max(weight, reps),
        };
        calculated_values.one_rep_max = Some(one_rep_max);
        let relative = one_rep_max / profile.body_weight;
        percentiles.strength = Some(rank(
            ReferenceMetric::RelativeStrength(strength.exercise),
            relative,
            profile,
        )?);
    }

    if let Some(hba1c) = readings.blood_sugar {
        percentiles.blood_sugar = Some(rank(ReferenceMetric::BloodSugar, hba1c, profile)?);
    }

    if let Some(cholesterol) = &readings.cholesterol {
        let ratio = cholesterol.total / cholesterol.hdl;
        percentiles.cholesterol = Some(rank(ReferenceMetric::CholesterolRatio, ratio, profile)?);
    }

    if let Some(sleep) = &readings.sleep {
        let score = sleep_score(sleep);
        calculated_values.sleep_score = Some(score);
        percentiles.sleep = Some(rank(ReferenceMetric::SleepScore, score, profile)?);
    }

    debug!(
        age_years = profile.age_years,
        assessed = percentiles.values().count(),
        "computed percentiles"
    );

    Ok(PercentileOutcome {
        percentiles,
        calculated_values,
    })
}

fn rank(metric: ReferenceMetric, value: f64, profile: &SubjectProfile) -> Result<f64, EngineError> {
    let params = reference::lookup(metric, profile.age_years, profile.sex)?;
    Ok(round1(params.percentile(value, metric.direction())))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
