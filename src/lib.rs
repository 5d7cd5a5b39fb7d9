//! Vitals Engine
//!
//! Pure computation engine for personal health metrics: converts raw
//! biometric readings plus demographic context (age, sex) into
//! percentile rankings against a reference population, derives
//! calculated values (estimated one-rep-max, sleep composite score),
//! and aggregates the percentiles into an overall health-risk
//! classification.
//!
//! The engine is stateless and synchronous: every call is a pure
//! function of its explicit input plus static reference tables, so
//! concurrent invocations need no locking. Transport, persistence, and
//! presentation are caller concerns — the engine receives already-parsed
//! numeric input and returns plain structured output.
//!
//! # Usage
//!
//! ```
//! use vitals_engine::{
//!     assess_risk, compute_percentiles, MetricReadings, Sex, SubjectProfile,
//! };
//!
//! let profile = SubjectProfile {
//!     age_years: 30,
//!     sex: Sex::Male,
//!     body_weight: 180.0,
//! };
//! let readings = MetricReadings {
//!     blood_sugar: Some(6.0),
//!     ..Default::default()
//! };
//!
//! let outcome = compute_percentiles(&profile, &readings).unwrap();
//! let risk = assess_risk(&outcome.percentiles);
//! assert!(risk.score >= 0.0 && risk.score <= 100.0);
//! ```

pub mod errors;
pub mod percentile;
pub mod reference;
pub mod risk;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::EngineError;
pub use percentile::{
    compute_percentiles, derive_age, derive_age_as_of, estimate_one_rep_max, sleep_score,
    PercentileOutcome,
};
pub use risk::{assess_risk, PEAK_SCORE_THRESHOLD, PROGRESSING_SCORE_THRESHOLD};
pub use types::*;
