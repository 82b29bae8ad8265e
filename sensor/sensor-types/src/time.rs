//! Sample timestamps.
//!
//! Accelerometer backends report time as floating-point seconds; the core
//! stores nanoseconds so that ordering and equality are exact.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SensorError;

/// Nanosecond-precision timestamp of an accelerometer sample.
///
/// The epoch is whatever the sampler chooses (boot time, session start).
/// Only differences between timestamps from the same sampler are meaningful.
///
/// # Example
///
/// ```
/// use sensor_types::Timestamp;
///
/// let ts = Timestamp::from_secs_f64(0.25);
/// assert_eq!(ts.as_nanos(), 250_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    /// Creates a timestamp from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a timestamp from floating-point seconds.
    ///
    /// Negative and `NaN` inputs clamp to zero.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn from_secs_f64(secs: f64) -> Self {
        let nanos = (secs * 1e9).max(0.0) as u64;
        Self { nanos }
    }

    /// Creates a timestamp from floating-point seconds, rejecting values
    /// that cannot be represented.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidTimestamp`] for negative, infinite or
    /// `NaN` input.
    pub fn try_from_secs_f64(secs: f64) -> Result<Self, SensorError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(SensorError::invalid_timestamp(format!("{secs} s")));
        }
        Ok(Self::from_secs_f64(secs))
    }

    /// Creates a timestamp from a duration since the sampler's epoch.
    ///
    /// Saturates at `u64::MAX` nanoseconds.
    #[must_use]
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self {
            nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the timestamp as nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.nanos
    }

    /// Returns the timestamp as floating-point seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / 1e9
    }

    /// Returns the zero timestamp.
    #[must_use]
    pub const fn zero() -> Self {
        Self { nanos: 0 }
    }

    /// Time elapsed from `earlier` to `self`, or zero if `earlier` is later.
    #[must_use]
    pub const fn elapsed_since(self, earlier: Self) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}
