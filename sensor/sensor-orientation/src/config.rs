//! Classifier and session configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use sensor_types::InterfaceOrientation;

use crate::error::{OrientationError, Result};

/// Thresholds used by the orientation classifier.
///
/// All values are in units of g and compared against raw axis readings.
///
/// # Example
///
/// ```
/// use sensor_orientation::ClassifierConfig;
///
/// let config = ClassifierConfig::default().with_tilt_threshold(0.4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Minimum `|z|` for a face-up / face-down reading, when z is the
    /// dominant axis. Default: 0.75 (about 49° from vertical).
    pub face_threshold: f64,

    /// Minimum reading on the dominant in-plane axis (x or y) for a portrait
    /// or landscape reading. Default: 0.3.
    pub tilt_threshold: f64,

    /// Samples with a smaller vector magnitude are treated as free fall or a
    /// sensor glitch and never cause a transition. Default: 0.1.
    pub min_magnitude: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            face_threshold: 0.75,
            tilt_threshold: 0.3,
            min_magnitude: 0.1,
        }
    }
}

impl ClassifierConfig {
    /// Sets the face-up / face-down threshold.
    #[must_use]
    pub const fn with_face_threshold(mut self, threshold: f64) -> Self {
        self.face_threshold = threshold;
        self
    }

    /// Sets the portrait / landscape threshold.
    #[must_use]
    pub const fn with_tilt_threshold(mut self, threshold: f64) -> Self {
        self.tilt_threshold = threshold;
        self
    }

    /// Sets the free-fall magnitude floor.
    #[must_use]
    pub const fn with_min_magnitude(mut self, magnitude: f64) -> Self {
        self.min_magnitude = magnitude;
        self
    }

    /// Validates the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`OrientationError::InvalidConfig`] if a threshold is not a
    /// positive finite number, or if the tilt threshold is not below the
    /// face threshold.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("face_threshold", self.face_threshold),
            ("tilt_threshold", self.tilt_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OrientationError::invalid_config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if !self.min_magnitude.is_finite() || self.min_magnitude < 0.0 {
            return Err(OrientationError::invalid_config(format!(
                "min_magnitude must be non-negative and finite, got {}",
                self.min_magnitude
            )));
        }

        if self.tilt_threshold >= self.face_threshold {
            return Err(OrientationError::invalid_config(format!(
                "tilt_threshold ({}) must be below face_threshold ({})",
                self.tilt_threshold, self.face_threshold
            )));
        }

        Ok(())
    }
}

/// Set of interface orientations the host allows.
///
/// When the device turns to an orientation whose interface orientation is not
/// allowed, the interface orientation keeps its previous value, the same way
/// it does for face-up and face-down readings. The device orientation is
/// always reported.
///
/// The default, [`OrientationLock::ALL`], follows the device regardless of
/// any lock the operating system or app has set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationLock {
    mask: u8,
}

impl OrientationLock {
    /// Every interface orientation.
    pub const ALL: Self = Self { mask: 0b1111 };
    /// Upright portrait only.
    pub const PORTRAIT: Self = Self { mask: 0b0001 };
    /// Both landscape orientations.
    pub const LANDSCAPE: Self = Self { mask: 0b1100 };
    /// Everything except portrait upside down.
    pub const ALL_BUT_UPSIDE_DOWN: Self = Self { mask: 0b1101 };

    const fn bit(orientation: InterfaceOrientation) -> u8 {
        match orientation {
            InterfaceOrientation::Unknown => 0,
            InterfaceOrientation::Portrait => 0b0001,
            InterfaceOrientation::PortraitUpsideDown => 0b0010,
            InterfaceOrientation::LandscapeLeft => 0b0100,
            InterfaceOrientation::LandscapeRight => 0b1000,
        }
    }

    /// A lock allowing exactly one interface orientation.
    #[must_use]
    pub const fn only(orientation: InterfaceOrientation) -> Self {
        Self {
            mask: Self::bit(orientation),
        }
    }

    /// Returns a copy that also allows `orientation`.
    #[must_use]
    pub const fn with(self, orientation: InterfaceOrientation) -> Self {
        Self {
            mask: self.mask | Self::bit(orientation),
        }
    }

    /// Returns `true` if `orientation` may be adopted as the interface
    /// orientation. `Unknown` is never allowed.
    #[must_use]
    pub const fn allows(self, orientation: InterfaceOrientation) -> bool {
        self.mask & Self::bit(orientation) != 0
    }

    /// Returns `true` if no orientation is allowed.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.mask & Self::ALL.mask == 0
    }
}

impl Default for OrientationLock {
    fn default() -> Self {
        Self::ALL
    }
}

/// When the observer is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeliveryPolicy {
    /// Only when the device orientation changes.
    #[default]
    OnChange,
    /// For every delivered sample, with the current stable orientations.
    EverySample,
}

/// Configuration for an [`OrientationNotifier`](crate::OrientationNotifier).
///
/// # Example
///
/// ```
/// use sensor_orientation::{DeliveryPolicy, NotifierConfig, OrientationLock};
///
/// let config = NotifierConfig::default()
///     .with_delivery(DeliveryPolicy::EverySample)
///     .with_lock(OrientationLock::ALL_BUT_UPSIDE_DOWN)
///     .with_hold_samples(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotifierConfig {
    /// Classifier thresholds.
    pub classifier: ClassifierConfig,

    /// Observer delivery policy. Default: [`DeliveryPolicy::OnChange`].
    pub delivery: DeliveryPolicy,

    /// Allowed interface orientations. Default: [`OrientationLock::ALL`].
    pub lock: OrientationLock,

    /// Consecutive samples a new device orientation must persist for before
    /// it is confirmed. `1` confirms on the first sample. Default: 1.
    pub hold_samples: u32,

    /// Low-pass smoothing factor in `[0, 1)`. Each step keeps this fraction
    /// of the previous filtered vector. `0.0` disables smoothing. Default: 0.0.
    pub smoothing: f64,
}

impl NotifierConfig {
    /// Sets the classifier thresholds.
    #[must_use]
    pub const fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the delivery policy.
    #[must_use]
    pub const fn with_delivery(mut self, delivery: DeliveryPolicy) -> Self {
        self.delivery = delivery;
        self
    }

    /// Sets the allowed interface orientations.
    #[must_use]
    pub const fn with_lock(mut self, lock: OrientationLock) -> Self {
        self.lock = lock;
        self
    }

    /// Sets the debounce length in samples.
    #[must_use]
    pub const fn with_hold_samples(mut self, hold_samples: u32) -> Self {
        self.hold_samples = hold_samples;
        self
    }

    /// Sets the low-pass smoothing factor.
    #[must_use]
    pub const fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OrientationError::InvalidConfig`] describing the first
    /// invalid field.
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;

        if self.lock.is_empty() {
            return Err(OrientationError::invalid_config(
                "lock must allow at least one interface orientation",
            ));
        }

        if self.hold_samples == 0 {
            return Err(OrientationError::invalid_config(
                "hold_samples must be at least 1",
            ));
        }

        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(OrientationError::invalid_config(format!(
                "smoothing must be in [0, 1), got {}",
                self.smoothing
            )));
        }

        Ok(())
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            delivery: DeliveryPolicy::OnChange,
            lock: OrientationLock::ALL,
            hold_samples: 1,
            smoothing: 0.0,
        }
    }
}
