//! Accelerometer-based orientation classification.
//!
//! The classifier looks at which axis gravity dominates:
//!
//! 1. Non-finite or near-zero vectors (free fall, glitches) are ambiguous.
//! 2. `z` dominant and above the face threshold: face up (`z < 0`) or face
//!    down (`z > 0`).
//! 3. `y` dominant over `x` and above the tilt threshold: portrait (`y < 0`,
//!    top edge up) or portrait upside down (`y > 0`).
//! 4. `x` dominant over `y` and above the tilt threshold: landscape left
//!    (`x > 0`, right edge down) or landscape right (`x < 0`).
//! 5. Anything else, including `|x| == |y|`, is ambiguous.
//!
//! Ambiguous samples return the previous orientation. This is the hysteresis
//! that keeps the result from flickering near 45° and when nearly flat.

use sensor_types::{AccelerationSample, DeviceOrientation, InterfaceOrientation};

use crate::config::{ClassifierConfig, OrientationLock};
use crate::error::Result;

/// Maps acceleration samples to device orientations.
///
/// # Example
///
/// ```
/// use sensor_orientation::{ClassifierConfig, OrientationClassifier};
/// use sensor_types::{AccelerationSample, DeviceOrientation};
///
/// let classifier = OrientationClassifier::new(ClassifierConfig::default()).unwrap();
/// let upright = AccelerationSample::from_xyz(0.0, -1.0, 0.0);
///
/// assert_eq!(
///     classifier.classify(&upright, DeviceOrientation::Unknown),
///     DeviceOrientation::Portrait
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationClassifier {
    config: ClassifierConfig,
}

impl OrientationClassifier {
    /// Creates a classifier with the given thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`OrientationError::InvalidConfig`](crate::OrientationError::InvalidConfig)
    /// if `config` fails [`ClassifierConfig::validate`]. A face threshold at or
    /// below the tilt threshold would let weak readings flip the orientation.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Wraps thresholds the caller has already validated.
    pub(crate) const fn from_validated(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies one sample, returning `previous` when the reading is
    /// ambiguous.
    #[must_use]
    pub fn classify(
        &self,
        sample: &AccelerationSample,
        previous: DeviceOrientation,
    ) -> DeviceOrientation {
        self.classify_strict(sample).unwrap_or(previous)
    }

    /// Classifies one sample, returning `None` when the reading is ambiguous.
    #[must_use]
    pub fn classify_strict(&self, sample: &AccelerationSample) -> Option<DeviceOrientation> {
        if !sample.is_finite() || sample.magnitude() < self.config.min_magnitude {
            return None;
        }

        let [x, y, z] = sample.acceleration;
        let (ax, ay, az) = (x.abs(), y.abs(), z.abs());

        if az >= ax && az >= ay && az > self.config.face_threshold {
            return Some(if z < 0.0 {
                DeviceOrientation::FaceUp
            } else {
                DeviceOrientation::FaceDown
            });
        }

        if ay > ax && ay > self.config.tilt_threshold {
            return Some(if y < 0.0 {
                DeviceOrientation::Portrait
            } else {
                DeviceOrientation::PortraitUpsideDown
            });
        }

        if ax > ay && ax > self.config.tilt_threshold {
            return Some(if x > 0.0 {
                DeviceOrientation::LandscapeLeft
            } else {
                DeviceOrientation::LandscapeRight
            });
        }

        None
    }
}

/// Classifies a sample with the default thresholds.
///
/// See [`OrientationClassifier::classify`].
#[must_use]
pub fn classify(sample: &AccelerationSample, previous: DeviceOrientation) -> DeviceOrientation {
    OrientationClassifier::default().classify(sample, previous)
}

/// Derives the interface orientation for a new device orientation.
///
/// Keeps `current` when the device orientation implies no interface
/// orientation (unknown, face up, face down) or when `lock` does not allow
/// the implied one.
#[must_use]
pub fn derive_interface(
    device: DeviceOrientation,
    current: InterfaceOrientation,
    lock: OrientationLock,
) -> InterfaceOrientation {
    match InterfaceOrientation::from_device(device) {
        Some(next) if lock.allows(next) => next,
        _ => current,
    }
}

/// Last confirmed device and interface orientation of a session.
///
/// Both fields change together in [`apply`](Self::apply), so a copy of this
/// struct is always a consistent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassifierState {
    /// Last confirmed device orientation.
    pub device: DeviceOrientation,
    /// Last derived interface orientation.
    pub interface: InterfaceOrientation,
}

impl ClassifierState {
    /// Both orientations unknown.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            device: DeviceOrientation::Unknown,
            interface: InterfaceOrientation::Unknown,
        }
    }

    /// Resets both orientations to unknown.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies a confirmed device orientation.
    ///
    /// Returns `true` if the device orientation changed. The interface
    /// orientation is only recomputed on a change.
    pub fn apply(&mut self, device: DeviceOrientation, lock: OrientationLock) -> bool {
        if device == self.device {
            return false;
        }
        self.interface = derive_interface(device, self.interface, lock);
        self.device = device;
        true
    }
}

/// Requires a candidate orientation to repeat before it is confirmed.
#[derive(Debug, Clone)]
pub(crate) struct Debouncer {
    hold_samples: u32,
    candidate: DeviceOrientation,
    count: u32,
}

impl Debouncer {
    /// Creates a debouncer confirming after `hold_samples` consecutive
    /// matching samples (at least 1).
    #[must_use]
    pub(crate) fn new(hold_samples: u32) -> Self {
        Self {
            hold_samples: hold_samples.max(1),
            candidate: DeviceOrientation::Unknown,
            count: 0,
        }
    }

    /// Feeds a classified orientation. Returns the orientation to treat as
    /// stable: `candidate` once confirmed, otherwise `stable`.
    pub(crate) fn confirm(
        &mut self,
        candidate: DeviceOrientation,
        stable: DeviceOrientation,
    ) -> DeviceOrientation {
        if candidate == stable {
            self.count = 0;
            return stable;
        }

        if candidate == self.candidate {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = candidate;
            self.count = 1;
        }

        if self.count >= self.hold_samples {
            self.count = 0;
            candidate
        } else {
            stable
        }
    }

    /// Drops any pending candidate.
    pub(crate) fn reset(&mut self) {
        self.candidate = DeviceOrientation::Unknown;
        self.count = 0;
    }
}
