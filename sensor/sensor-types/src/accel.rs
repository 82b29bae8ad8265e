//! Accelerometer samples.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SensorError, Timestamp};

/// One 3-axis accelerometer reading.
///
/// # Units and axes
///
/// Acceleration is expressed in units of standard gravity (g), as reported by
/// phone motion services. The axes are fixed to the device body:
///
/// - `x` points toward the right edge of the screen
/// - `y` points toward the top edge of the screen
/// - `z` points out of the screen, toward the viewer
///
/// A resting device reads `-1` along the axis pointing up, so a device held
/// upright reads approximately `[0, -1, 0]` and a device lying screen-up on a
/// table reads approximately `[0, 0, -1]`.
///
/// # Example
///
/// ```
/// use sensor_types::{AccelerationSample, Timestamp};
///
/// let upright = AccelerationSample::new(Timestamp::from_secs_f64(0.2), [0.0, -1.0, 0.0]);
/// assert!(upright.y() < -0.9);
/// assert!((upright.magnitude() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccelerationSample {
    /// When the sample was taken.
    pub timestamp: Timestamp,

    /// Acceleration in g: `[x, y, z]`.
    pub acceleration: [f64; 3],
}

impl AccelerationSample {
    /// Creates a sample without validating its components.
    #[must_use]
    pub const fn new(timestamp: Timestamp, acceleration: [f64; 3]) -> Self {
        Self {
            timestamp,
            acceleration,
        }
    }

    /// Creates a sample at time zero. Handy for offline classification.
    #[must_use]
    pub const fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Timestamp::zero(), [x, y, z])
    }

    /// Creates a sample, rejecting non-finite components.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::NonFiniteAcceleration`] naming the first
    /// offending axis.
    pub fn try_new(timestamp: Timestamp, acceleration: [f64; 3]) -> Result<Self, SensorError> {
        for (axis, value) in ['x', 'y', 'z'].into_iter().zip(acceleration) {
            if !value.is_finite() {
                return Err(SensorError::non_finite(axis, value));
            }
        }
        Ok(Self::new(timestamp, acceleration))
    }

    /// Acceleration along the device x axis.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.acceleration[0]
    }

    /// Acceleration along the device y axis.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.acceleration[1]
    }

    /// Acceleration along the device z axis.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.acceleration[2]
    }

    /// Euclidean norm of the acceleration vector.
    ///
    /// About 1.0 at rest, near 0.0 in free fall.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let [x, y, z] = self.acceleration;
        x.hypot(y).hypot(z)
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.acceleration.iter().all(|v| v.is_finite())
    }

    /// Returns a copy with the acceleration replaced, keeping the timestamp.
    #[must_use]
    pub const fn with_acceleration(self, acceleration: [f64; 3]) -> Self {
        Self {
            timestamp: self.timestamp,
            acceleration,
        }
    }
}
