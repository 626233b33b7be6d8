//! Errors reported by the interpolation engine.

use thiserror::Error;

/// Contract violations detected before any interpolation work is done.
///
/// Every variant is an invalid-input condition: the caller supplied data the
/// engine cannot interpret, and no output is produced. Numerical degeneracies
/// met while iterating are not errors; they are reported through
/// [`crate::Observer`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    #[error("series has no periods")]
    EmptySeries,

    #[error("{n_values} values were given for {n_lengths} period lengths")]
    LengthMismatch { n_values: usize, n_lengths: usize },

    #[error("period {period} has length {length}, but lengths must be positive integers")]
    NonPositiveLength { period: usize, length: usize },

    #[error("period {period} has non-finite value {value}")]
    NonFiniteValue { period: usize, value: f64 },

    #[error("total number of samples overflows at period {period}")]
    SampleCountOverflow { period: usize },

    #[error("sample {index} has non-finite value {value}")]
    NonFiniteSample { index: usize, value: f64 },

    #[error("invalid bounds: min_val {min_val:?}, max_val {max_val:?}")]
    InvalidBounds {
        min_val: Option<f64>,
        max_val: Option<f64>,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("expected {expected} samples, but got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("invalid spline knots: {0}")]
    InvalidKnots(String),
}

pub type Result<T> = std::result::Result<T, InterpError>;
