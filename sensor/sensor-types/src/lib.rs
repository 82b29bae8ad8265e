//! Accelerometer and orientation data types.
//!
//! This crate provides the data model shared by orientation processing code:
//!
//! - [`AccelerationSample`] - One timestamped 3-axis accelerometer reading (in g)
//! - [`Timestamp`] - Nanosecond-precision sample time
//! - [`DeviceOrientation`] - Physical attitude of the device
//! - [`InterfaceOrientation`] - Orientation on-screen content is drawn in
//!
//! # Layer 0 Crate
//!
//! There is no processing logic here. Classification and session handling
//! live in `sensor-orientation`; this crate can be used by samplers, replay
//! tools and hosts without pulling those in.
//!
//! # Axis Convention
//!
//! Samples follow the phone motion-service convention: `x` toward the right
//! edge, `y` toward the top edge, `z` out of the screen, and a resting device
//! reads `-1 g` along whichever axis points up.
//!
//! # Example
//!
//! ```
//! use sensor_types::{AccelerationSample, DeviceOrientation, InterfaceOrientation, Timestamp};
//!
//! let sample = AccelerationSample::new(Timestamp::from_secs_f64(0.2), [1.0, 0.0, 0.0]);
//! assert!(sample.x() > 0.9);
//!
//! // Device landscape maps to the opposite interface landscape.
//! assert_eq!(
//!     InterfaceOrientation::from_device(DeviceOrientation::LandscapeLeft),
//!     Some(InterfaceOrientation::LandscapeRight)
//! );
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod accel;
mod error;
mod orientation;
mod time;

pub use accel::AccelerationSample;
pub use error::SensorError;
pub use orientation::{DeviceOrientation, InterfaceOrientation};
pub use time::Timestamp;
