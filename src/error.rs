use thiserror::Error;

use crate::axis::Axis;

/// Errors reported by the controller and its configuration layer.
///
/// Every variant is raised synchronously by the call that detected it, and
/// none of them leave partially updated loop state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("{which} vector has {len} entries, expected 6")]
    InvalidInputSize { which: &'static str, len: usize },

    #[error("time delta must be finite and non-negative, got {0}")]
    InvalidTimeDelta(f64),

    #[error("non-finite {which} value on {axis} axis")]
    NonFiniteInput { which: &'static str, axis: Axis },

    #[error("numeric overflow on {axis} axis")]
    NumericOverflow { axis: Axis },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),
}

impl ControlError {
    /// Stable status code used across the C ABI. Success is `1`, a null
    /// handle is `-1`.
    pub fn code(&self) -> i32 {
        match self {
            ControlError::InvalidInputSize { .. } => -2,
            ControlError::InvalidTimeDelta(_) => -3,
            ControlError::NonFiniteInput { .. } => -4,
            ControlError::InvalidConfiguration(_) => -5,
            ControlError::ConfigLoad(_) => -6,
            ControlError::NumericOverflow { .. } => -7,
        }
    }
}
