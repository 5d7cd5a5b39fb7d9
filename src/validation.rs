//! Domain-bound validation for profiles and metric readings
//!
//! The engine owns these checks even when an outer transport layer
//! performs a redundant first pass: every reading is validated against
//! its documented domain before any reference lookup happens.

use crate::errors::EngineError;
use crate::types::{
    Cholesterol, MetricReadings, Sleep, StrengthMeasurement, StrengthTraining, SubjectProfile,
};

/// HbA1c lower bound, percent
pub const BLOOD_SUGAR_MIN: f64 = 3.5;
/// HbA1c upper bound, percent
pub const BLOOD_SUGAR_MAX: f64 = 70.0;
/// Body weight bounds, pounds
pub const BODY_WEIGHT_MIN: f64 = 1.0;
pub const BODY_WEIGHT_MAX: f64 = 1000.0;
/// Resting heart rate bounds, bpm
pub const HEART_RATE_MIN: f64 = 20.0;
pub const HEART_RATE_MAX: f64 = 300.0;
/// Sleep duration upper bound, hours
pub const SLEEP_DURATION_MAX: f64 = 24.0;

fn out_of_range(field: &'static str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidMetricRange {
        field,
        message: message.into(),
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_nan() || value.is_infinite() {
        return Err(out_of_range(field, "must be a finite number"));
    }
    Ok(())
}

/// Validate body weight (pounds)
pub fn validate_body_weight(weight: f64) -> Result<(), EngineError> {
    require_finite("bodyWeight", weight)?;
    if !(BODY_WEIGHT_MIN..=BODY_WEIGHT_MAX).contains(&weight) {
        return Err(out_of_range(
            "bodyWeight",
            format!("must be between {BODY_WEIGHT_MIN} and {BODY_WEIGHT_MAX} lbs"),
        ));
    }
    Ok(())
}

/// Validate a 1-mile time in seconds
pub fn validate_cardio_fitness(seconds: f64) -> Result<(), EngineError> {
    require_finite("cardioFitness", seconds)?;
    if seconds <= 0.0 {
        return Err(out_of_range("cardioFitness", "must be greater than 0 seconds"));
    }
    Ok(())
}

/// Validate resting heart rate (bpm)
pub fn validate_heart_rate(bpm: f64) -> Result<(), EngineError> {
    require_finite("heartRate", bpm)?;
    if !(HEART_RATE_MIN..=HEART_RATE_MAX).contains(&bpm) {
        return Err(out_of_range(
            "heartRate",
            format!("must be between {HEART_RATE_MIN} and {HEART_RATE_MAX} bpm"),
        ));
    }
    Ok(())
}

/// Validate an HbA1c reading (percent)
pub fn validate_blood_sugar(hba1c: f64) -> Result<(), EngineError> {
    require_finite("bloodSugar", hba1c)?;
    if !(BLOOD_SUGAR_MIN..=BLOOD_SUGAR_MAX).contains(&hba1c) {
        return Err(out_of_range(
            "bloodSugar",
            format!("must be between {BLOOD_SUGAR_MIN} and {BLOOD_SUGAR_MAX} percent"),
        ));
    }
    Ok(())
}

/// Validate a cholesterol panel; both values must be positive
pub fn validate_cholesterol(cholesterol: &Cholesterol) -> Result<(), EngineError> {
    require_finite("cholesterol.total", cholesterol.total)?;
    require_finite("cholesterol.hdl", cholesterol.hdl)?;
    if cholesterol.total <= 0.0 {
        return Err(out_of_range("cholesterol.total", "must be greater than 0"));
    }
    if cholesterol.hdl <= 0.0 {
        return Err(out_of_range("cholesterol.hdl", "must be greater than 0"));
    }
    Ok(())
}

/// Validate a sleep reading: duration 0-24h, fractions 0-1
pub fn validate_sleep(sleep: &Sleep) -> Result<(), EngineError> {
    require_finite("sleep.duration", sleep.duration)?;
    if !(0.0..=SLEEP_DURATION_MAX).contains(&sleep.duration) {
        return Err(out_of_range(
            "sleep.duration",
            format!("must be between 0 and {SLEEP_DURATION_MAX} hours"),
        ));
    }
    for (field, value) in [
        ("sleep.efficiency", sleep.efficiency),
        ("sleep.rem", sleep.rem),
        ("sleep.deep", sleep.deep),
    ] {
        require_finite(field, value)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(out_of_range(field, "must be between 0 and 1"));
        }
    }
    Ok(())
}

/// Validate a strength reading
pub fn validate_strength(strength: &StrengthTraining) -> Result<(), EngineError> {
    match strength.measurement {
        StrengthMeasurement::OneRepMax { one_rep_max } => {
            require_finite("strengthTraining.oneRepMax", one_rep_max)?;
            if one_rep_max <= 0.0 {
                return Err(out_of_range(
                    "strengthTraining.oneRepMax",
                    "must be greater than 0 lbs",
                ));
            }
        }
        StrengthMeasurement::WeightReps { weight, reps } => {
            require_finite("strengthTraining.weight", weight)?;
            if weight <= 0.0 {
                return Err(out_of_range(
                    "strengthTraining.weight",
                    "must be greater than 0 lbs",
                ));
            }
            if reps < 1 {
                return Err(out_of_range("strengthTraining.reps", "must be at least 1"));
            }
        }
    }
    Ok(())
}

/// Validate a profile and every present reading in one pass
pub fn validate_readings(
    profile: &SubjectProfile,
    readings: &MetricReadings,
) -> Result<(), EngineError> {
    validate_body_weight(profile.body_weight)?;
    if let Some(seconds) = readings.cardio_fitness {
        validate_cardio_fitness(seconds)?;
    }
    if let Some(bpm) = readings.heart_rate {
        validate_heart_rate(bpm)?;
    }
    if let Some(strength) = &readings.strength_training {
        validate_strength(strength)?;
    }
    if let Some(hba1c) = readings.blood_sugar {
        validate_blood_sugar(hba1c)?;
    }
    if let Some(cholesterol) = &readings.cholesterol {
        validate_cholesterol(cholesterol)?;
    }
    if let Some(sleep) = &readings.sleep {
        validate_sleep(sleep)?;
    }
    Ok(())
}
