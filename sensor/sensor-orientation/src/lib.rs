//! Device and interface orientation from a 3-axis accelerometer stream.
//!
//! Works out how a device is physically held, and which way on-screen content
//! should be drawn, using only gravity as seen by the accelerometer. Because
//! it never asks the operating system, the result is unaffected by a
//! screen-rotation lock or an app restricted to one orientation.
//!
//! # Classification
//!
//! - [`OrientationClassifier`] / [`classify`] - Sample plus previous
//!   orientation to device orientation, with hysteresis on ambiguous readings
//! - [`derive_interface`] - Device orientation to interface orientation;
//!   landscape is inverted and face up / face down hold the previous value
//! - [`ClassifierConfig`] - Tunable face and tilt thresholds
//!
//! # Sessions
//!
//! - [`OrientationNotifier`] - Owns a sampler, keeps the last confirmed
//!   orientations and calls an observer when they change
//! - [`NotifierConfig`] - Delivery policy, orientation lock, debouncing and
//!   smoothing
//!
//! # Samplers
//!
//! - [`AccelerationSampler`] - Seam to the platform motion service
//! - [`ManualSampler`] / [`SampleFeed`] - Host-driven delivery
//! - [`ThreadSampler`] - Background-thread polling of a reading closure
//!
//! # Threading
//!
//! The observer runs on whatever thread the sampler delivers on. Callers
//! needing main-thread delivery must marshal the call themselves.
//!
//! # Example
//!
//! ```
//! use sensor_orientation::classify;
//! use sensor_types::{AccelerationSample, DeviceOrientation};
//!
//! let mut device = DeviceOrientation::Unknown;
//! for [x, y, z] in [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.1, 0.15, 0.2]] {
//!     device = classify(&AccelerationSample::from_xyz(x, y, z), device);
//! }
//! assert_eq!(device, DeviceOrientation::FaceDown);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod classifier;
mod config;
mod error;
mod filter;
mod notifier;
mod sampler;

// Re-export classification types
pub use classifier::{classify, derive_interface, ClassifierState, OrientationClassifier};

// Re-export configuration types
pub use config::{ClassifierConfig, DeliveryPolicy, NotifierConfig, OrientationLock};

// Re-export session types
pub use notifier::{NotifierState, Observer, OrientationNotifier};

// Re-export sampler types
pub use sampler::{AccelerationSampler, ManualSampler, SampleFeed, SampleHandler, ThreadSampler};

// Re-export error types
pub use error::{OrientationError, Result, SamplerError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        classify, derive_interface, AccelerationSampler, ClassifierConfig, ClassifierState,
        DeliveryPolicy, ManualSampler, NotifierConfig, NotifierState, OrientationClassifier,
        OrientationError, OrientationLock, OrientationNotifier, SampleFeed, SamplerError,
        ThreadSampler,
    };
    pub use sensor_types::{AccelerationSample, DeviceOrientation, InterfaceOrientation, Timestamp};
}
