//! Errors raised by the forward model.

use thiserror::Error;

/// Errors that can occur while evaluating the sphere model.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Sample set must have shape (N, 3), got ({rows}, {cols})")]
    InvalidShape { rows: usize, cols: usize },

    #[error("{what} has {found} rows but the sample set has {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid survey: {0}")]
    InvalidSurvey(String),
}
