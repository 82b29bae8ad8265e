//! Error types for sensor data.

use thiserror::Error;

/// Errors raised when constructing sensor data from untrusted input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// An acceleration component is `NaN` or infinite.
    #[error("non-finite acceleration on {axis} axis: {value}")]
    NonFiniteAcceleration {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// The offending value.
        value: f64,
    },

    /// Timestamp cannot be represented (negative, infinite or `NaN`).
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl SensorError {
    /// Creates a non-finite acceleration error.
    #[must_use]
    pub const fn non_finite(axis: char, value: f64) -> Self {
        Self::NonFiniteAcceleration { axis, value }
    }

    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp(reason.into())
    }
}
