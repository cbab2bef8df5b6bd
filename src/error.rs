//! Error types for the calculation engine
//!
//! Every failure the engine can produce is a typed, synchronous error.
//! Calculators check their inputs before dividing, so a zero or negative
//! dimension shows up here instead of as an `inf`/`NaN` result.

use thiserror::Error;

/// Result type for engine operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur while converting, looking up or calculating
#[derive(Debug, Error)]
pub enum CalcError {
    /// Unit tag was not one of mm, cm or inches
    #[error("Unknown unit of measurement: {0:?} (expected mm, cm or inches)")]
    InvalidUnit(String),

    /// A physical or pixel dimension was zero, negative or not finite
    #[error("Invalid {field}: {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    /// Camera/back name not present in the sensor registry
    #[error("Unknown camera or digital back: {0}")]
    UnknownSensor(String),

    /// Camera table file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Camera table or config file is not valid JSON of the expected shape
    #[error("JSON parse error: {0}")]
    Registry(#[from] serde_json::Error),
}

impl CalcError {
    /// Shorthand for an `InvalidDimension` error
    pub fn dimension(field: &'static str, value: f64) -> Self {
        CalcError::InvalidDimension { field, value }
    }
}

/// Require a finite, strictly positive value
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::dimension(field, value))
    }
}

/// Require a finite value that is zero or greater
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::dimension(field, value))
    }
}
