//! Property-based tests for orientation classification.
//!
//! These tests use proptest to generate random acceleration vectors and
//! verify the classifier's invariants.
//!
//! Run with: cargo test -p sensor-orientation -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use sensor_orientation::{classify, derive_interface, ClassifierConfig, ClassifierState, OrientationLock};
use sensor_types::{AccelerationSample, DeviceOrientation, InterfaceOrientation};

// =============================================================================
// Strategies
// =============================================================================

fn arb_device() -> impl Strategy<Value = DeviceOrientation> {
    prop::sample::select(DeviceOrientation::ALL.to_vec())
}

fn arb_interface() -> impl Strategy<Value = InterfaceOrientation> {
    prop::sample::select(vec![
        InterfaceOrientation::Unknown,
        InterfaceOrientation::Portrait,
        InterfaceOrientation::PortraitUpsideDown,
        InterfaceOrientation::LandscapeLeft,
        InterfaceOrientation::LandscapeRight,
    ])
}

/// Vectors whose largest component is below the default tilt threshold.
fn arb_weak_vector() -> impl Strategy<Value = [f64; 3]> {
    let limit = ClassifierConfig::default().tilt_threshold;
    prop::array::uniform3(-limit + 1e-9..limit - 1e-9)
}

/// Any vector a real accelerometer might report, in g.
fn arb_vector() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-2.0..2.0f64)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_weak_samples_keep_previous(v in arb_weak_vector(), previous in arb_device()) {
        let sample = AccelerationSample::from_xyz(v[0], v[1], v[2]);
        prop_assert_eq!(classify(&sample, previous), previous);
    }

    #[test]
    fn proptest_classification_is_deterministic(v in arb_vector(), previous in arb_device()) {
        let sample = AccelerationSample::from_xyz(v[0], v[1], v[2]);
        prop_assert_eq!(classify(&sample, previous), classify(&sample, previous));
    }

    #[test]
    fn proptest_previous_only_matters_when_ambiguous(v in arb_vector(), a in arb_device(), b in arb_device()) {
        let sample = AccelerationSample::from_xyz(v[0], v[1], v[2]);
        let from_a = classify(&sample, a);
        let from_b = classify(&sample, b);
        // Either the sample decided (both agree) or it was ambiguous (each kept its own).
        prop_assert!(from_a == from_b || (from_a == a && from_b == b));
    }

    #[test]
    fn proptest_landscape_is_always_inverted(v in arb_vector(), current in arb_interface()) {
        let sample = AccelerationSample::from_xyz(v[0], v[1], v[2]);
        let device = classify(&sample, DeviceOrientation::Unknown);
        let interface = derive_interface(device, current, OrientationLock::ALL);
        match device {
            DeviceOrientation::LandscapeLeft => {
                prop_assert_eq!(interface, InterfaceOrientation::LandscapeRight);
            }
            DeviceOrientation::LandscapeRight => {
                prop_assert_eq!(interface, InterfaceOrientation::LandscapeLeft);
            }
            _ => {}
        }
    }

    #[test]
    fn proptest_flat_states_hold_interface(current in arb_interface(), z in 0.8..1.5f64, face_up in any::<bool>()) {
        let z = if face_up { -z } else { z };
        let device = classify(&AccelerationSample::from_xyz(0.0, 0.0, z), DeviceOrientation::Unknown);
        prop_assert!(device.is_flat());
        prop_assert_eq!(derive_interface(device, current, OrientationLock::ALL), current);
    }

    #[test]
    fn proptest_interface_never_returns_to_unknown(
        vectors in prop::collection::vec(arb_vector(), 1..40)
    ) {
        let mut state = ClassifierState::new();
        let mut seen_upright = false;
        for v in vectors {
            let device = classify(&AccelerationSample::from_xyz(v[0], v[1], v[2]), state.device);
            state.apply(device, OrientationLock::ALL);
            seen_upright |= state.device.is_valid_interface_orientation();
            if seen_upright {
                prop_assert_ne!(state.interface, InterfaceOrientation::Unknown);
            }
        }
    }

    #[test]
    fn proptest_locked_interface_stays_in_lock(
        vectors in prop::collection::vec(arb_vector(), 1..40)
    ) {
        let lock = OrientationLock::ALL_BUT_UPSIDE_DOWN;
        let mut state = ClassifierState::new();
        for v in vectors {
            let device = classify(&AccelerationSample::from_xyz(v[0], v[1], v[2]), state.device);
            state.apply(device, lock);
            prop_assert!(
                state.interface == InterfaceOrientation::Unknown || lock.allows(state.interface)
            );
        }
    }
}
