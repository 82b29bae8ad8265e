//! End-to-end orientation sessions through the public API.
//!
//! Run with: cargo test -p sensor-orientation --test session_scenarios

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sensor_orientation::prelude::*;

type Call = (DeviceOrientation, InterfaceOrientation, Option<AccelerationSample>);

fn recording_notifier(
    config: NotifierConfig,
) -> (
    OrientationNotifier<ManualSampler>,
    SampleFeed,
    Arc<Mutex<Vec<Call>>>,
) {
    let sampler = ManualSampler::new();
    let feed = sampler.feed();
    let mut notifier = OrientationNotifier::new(sampler, config).unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    notifier
        .start(Duration::from_millis(200), move |device, interface, sample| {
            sink.lock().unwrap().push((device, interface, sample));
        })
        .unwrap();

    (notifier, feed, calls)
}

fn at(secs: f64, x: f64, y: f64, z: f64) -> AccelerationSample {
    AccelerationSample::new(Timestamp::from_secs_f64(secs), [x, y, z])
}

#[test]
fn portrait_landscape_face_down_then_ambiguous() {
    let (notifier, feed, calls) = recording_notifier(NotifierConfig::default());

    let portrait = at(0.2, 0.0, -1.0, 0.0);
    feed.deliver(portrait);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::Portrait);
    assert_eq!(notifier.interface_orientation(), InterfaceOrientation::Portrait);

    let landscape = at(0.4, 1.0, 0.0, 0.0);
    feed.deliver(landscape);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::LandscapeLeft);
    assert_eq!(
        notifier.interface_orientation(),
        InterfaceOrientation::LandscapeRight
    );

    let face_down = at(0.6, 0.0, 0.0, 1.0);
    feed.deliver(face_down);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::FaceDown);
    assert_eq!(
        notifier.interface_orientation(),
        InterfaceOrientation::LandscapeRight
    );

    feed.deliver(at(0.8, 0.1, 0.15, 0.2));
    assert_eq!(notifier.device_orientation(), DeviceOrientation::FaceDown);

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        &[
            (
                DeviceOrientation::Portrait,
                InterfaceOrientation::Portrait,
                Some(portrait)
            ),
            (
                DeviceOrientation::LandscapeLeft,
                InterfaceOrientation::LandscapeRight,
                Some(landscape)
            ),
            (
                DeviceOrientation::FaceDown,
                InterfaceOrientation::LandscapeRight,
                Some(face_down)
            ),
        ]
    );
}

#[test]
fn face_up_after_portrait_keeps_portrait_interface() {
    let (notifier, feed, calls) = recording_notifier(NotifierConfig::default());

    feed.deliver(at(0.0, 0.0, -1.0, 0.0));
    feed.deliver(at(0.2, 0.02, -0.1, -0.99));

    assert_eq!(notifier.device_orientation(), DeviceOrientation::FaceUp);
    assert_eq!(notifier.interface_orientation(), InterfaceOrientation::Portrait);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn landscape_right_round_trip() {
    let (notifier, feed, _calls) = recording_notifier(NotifierConfig::default());

    feed.deliver(at(0.0, -1.0, 0.0, 0.0));
    assert_eq!(notifier.device_orientation(), DeviceOrientation::LandscapeRight);
    assert_eq!(
        notifier.interface_orientation(),
        InterfaceOrientation::LandscapeLeft
    );

    feed.deliver(at(0.2, 0.0, 1.0, 0.0));
    assert_eq!(
        notifier.snapshot(),
        ClassifierState {
            device: DeviceOrientation::PortraitUpsideDown,
            interface: InterfaceOrientation::PortraitUpsideDown,
        }
    );
}

#[test]
fn interface_stays_unknown_until_first_upright_reading() {
    let (notifier, feed, calls) = recording_notifier(NotifierConfig::default());

    feed.deliver(at(0.0, 0.0, 0.0, -1.0));
    assert_eq!(notifier.device_orientation(), DeviceOrientation::FaceUp);
    assert_eq!(notifier.interface_orientation(), InterfaceOrientation::Unknown);

    feed.deliver(at(0.2, 0.0, -1.0, 0.0));
    assert_eq!(notifier.interface_orientation(), InterfaceOrientation::Portrait);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn stop_while_idle_is_silent() {
    let sampler = ManualSampler::new();
    let feed = sampler.feed();
    let mut notifier = OrientationNotifier::with_defaults(sampler);

    for _ in 0..5 {
        notifier.stop();
    }
    assert_eq!(notifier.state(), NotifierState::Idle);
    assert!(!feed.deliver(at(0.0, 0.0, -1.0, 0.0)));
}

#[test]
fn second_start_fails_without_reset() {
    let (mut notifier, feed, calls) = recording_notifier(NotifierConfig::default());
    feed.deliver(at(0.0, 0.0, -1.0, 0.0));

    let err = notifier.start(Duration::from_millis(100), |_, _, _| {});
    assert_eq!(err, Err(OrientationError::AlreadyRunning));
    assert_eq!(notifier.device_orientation(), DeviceOrientation::Portrait);

    // The original observer still receives updates.
    feed.deliver(at(0.2, 1.0, 0.0, 0.0));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn no_deliveries_after_stop() {
    let (mut notifier, feed, calls) = recording_notifier(NotifierConfig::default());
    feed.deliver(at(0.0, 0.0, -1.0, 0.0));
    notifier.stop();

    assert!(!feed.deliver(at(0.2, 1.0, 0.0, 0.0)));
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::Portrait);
}

#[test]
fn unavailable_sensor_surfaces_sampler_error() {
    let mut notifier =
        OrientationNotifier::with_defaults(ManualSampler::unavailable("no accelerometer"));

    let err = notifier
        .start(Duration::from_millis(200), |_, _, _| {})
        .unwrap_err();
    assert_eq!(
        err,
        OrientationError::SamplerUnavailable(SamplerError::Unavailable(
            "no accelerometer".to_string()
        ))
    );
    assert!(!notifier.is_running());
}

#[test]
fn debounce_ignores_brief_wobble() {
    let (notifier, feed, calls) =
        recording_notifier(NotifierConfig::default().with_hold_samples(2));

    feed.deliver_all([at(0.0, 0.0, -1.0, 0.0), at(0.1, 0.0, -1.0, 0.0)]);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::Portrait);

    // A single landscape blip is not confirmed.
    feed.deliver_all([at(0.2, 1.0, 0.0, 0.0), at(0.3, 0.0, -1.0, 0.0)]);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::Portrait);
    assert_eq!(calls.lock().unwrap().len(), 1);

    feed.deliver_all([at(0.4, 1.0, 0.0, 0.0), at(0.5, 1.0, 0.0, 0.0)]);
    assert_eq!(notifier.device_orientation(), DeviceOrientation::LandscapeLeft);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn landscape_lock_ignores_portrait() {
    let (notifier, feed, _calls) =
        recording_notifier(NotifierConfig::default().with_lock(OrientationLock::LANDSCAPE));

    feed.deliver(at(0.0, 1.0, 0.0, 0.0));
    feed.deliver(at(0.2, 0.0, -1.0, 0.0));

    assert_eq!(notifier.device_orientation(), DeviceOrientation::Portrait);
    assert_eq!(
        notifier.interface_orientation(),
        InterfaceOrientation::LandscapeRight
    );
}

#[test]
fn thread_sampler_drives_notifier() {
    let sampler = ThreadSampler::new(|| Some([0.0, -1.0, 0.0]));
    let mut notifier = OrientationNotifier::with_defaults(sampler);
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);

    notifier
        .start(Duration::from_millis(2), move |device, interface, sample| {
            let _ = tx.lock().unwrap().send((device, interface, sample));
        })
        .unwrap();

    let (device, interface, sample) = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(device, DeviceOrientation::Portrait);
    assert_eq!(interface, InterfaceOrientation::Portrait);
    assert!(sample.is_some());

    // Change-only: a steady source produces no further calls.
    assert!(rx.recv_timeout(Duration::from_millis(30)).is_err());

    notifier.stop();
    assert!(!notifier.sampler().is_running());
}
