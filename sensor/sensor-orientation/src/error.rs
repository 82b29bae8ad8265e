//! Error types for the sensor-orientation crate.

use thiserror::Error;

/// Errors reported by an [`AccelerationSampler`](crate::AccelerationSampler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// The accelerometer is missing or cannot be started.
    #[error("accelerometer unavailable: {0}")]
    Unavailable(String),

    /// The sampler backend failed for another reason.
    #[error("sampler backend error: {0}")]
    Backend(String),
}

impl SamplerError {
    /// Creates an unavailable-sensor error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend(reason.into())
    }
}

/// Errors that can occur when running an orientation session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrientationError {
    /// `start` was called while a session is already running.
    #[error("orientation updates are already running")]
    AlreadyRunning,

    /// The sampler refused to start. Passed through unchanged.
    #[error(transparent)]
    SamplerUnavailable(#[from] SamplerError),

    /// Invalid configuration or sampling interval.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OrientationError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

/// Result type for orientation operations.
pub type Result<T> = std::result::Result<T, OrientationError>;
