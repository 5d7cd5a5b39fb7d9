//! Error types for the vitals engine

use thiserror::Error;

/// Engine-wide error types
///
/// Every variant is recoverable at the call site: the engine never
/// terminates the process, and failure is purely a function return.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Date of birth is unparsable or in the future
    #[error("Invalid date of birth: {0}")]
    InvalidDate(String),

    /// Age falls outside every configured reference bracket
    #[error("No reference data for age {age_years}")]
    UnsupportedDemographic { age_years: u32 },

    /// A reading lies outside its documented domain
    #[error("Invalid {field}: {message}")]
    InvalidMetricRange {
        field: &'static str,
        message: String,
    },
}
