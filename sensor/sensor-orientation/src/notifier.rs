//! Orientation session: sampler registration, change detection and
//! observer delivery.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sensor_types::{AccelerationSample, DeviceOrientation, InterfaceOrientation};
use tracing::{debug, info, trace, warn};

use crate::classifier::{ClassifierState, Debouncer, OrientationClassifier};
use crate::config::{DeliveryPolicy, NotifierConfig};
use crate::error::{OrientationError, Result};
use crate::filter::LowPassFilter;
use crate::sampler::AccelerationSampler;

/// Callback receiving `(device, interface, sample)`.
///
/// Invoked on the sampler's delivery thread.
pub type Observer =
    Arc<dyn Fn(DeviceOrientation, InterfaceOrientation, Option<AccelerationSample>) + Send + Sync>;

/// Lifecycle state of an [`OrientationNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifierState {
    /// Not registered with the sampler.
    Idle,
    /// Receiving and classifying samples.
    Running,
}

/// Everything a sample handler touches, behind one lock.
struct Session {
    generation: u64,
    running: bool,
    state: ClassifierState,
    debouncer: Debouncer,
    filter: LowPassFilter,
    observer: Option<Observer>,
}

impl Session {
    fn new(config: &NotifierConfig) -> Self {
        Self {
            generation: 0,
            running: false,
            state: ClassifierState::new(),
            debouncer: Debouncer::new(config.hold_samples),
            filter: LowPassFilter::new(config.smoothing),
            observer: None,
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.wrapping_add(1)
    }

    fn begin(&mut self, generation: u64, observer: Observer) {
        self.generation = generation;
        self.running = true;
        self.state.reset();
        self.debouncer.reset();
        self.filter.reset();
        self.observer = Some(observer);
    }

    fn end(&mut self) {
        self.running = false;
        self.observer = None;
    }

    /// Runs one classification step. Returns the observer call to make, if
    /// any, so it can happen after the lock is released.
    fn ingest(
        &mut self,
        generation: u64,
        sample: &AccelerationSample,
        classifier: &OrientationClassifier,
        config: &NotifierConfig,
    ) -> Option<(Observer, ClassifierState)> {
        if !self.running || self.generation != generation {
            trace!("Dropping sample delivered after stop");
            return None;
        }

        let filtered = self.filter.apply(sample);
        let candidate = classifier.classify(&filtered, self.state.device);
        let confirmed = self.debouncer.confirm(candidate, self.state.device);
        let previous = self.state;
        let changed = self.state.apply(confirmed, config.lock);

        if changed {
            debug!(
                from = ?previous.device,
                device = ?self.state.device,
                interface = ?self.state.interface,
                "Orientation changed"
            );
        } else {
            trace!(device = ?self.state.device, "Orientation unchanged");
        }

        let notify = match config.delivery {
            DeliveryPolicy::OnChange => changed,
            DeliveryPolicy::EverySample => true,
        };
        if !notify {
            return None;
        }
        self.observer.clone().map(|observer| (observer, self.state))
    }
}

/// Tracks device and interface orientation from an accelerometer stream.
///
/// The notifier owns its sampler. [`start`](Self::start) resets the
/// orientation state and registers a handler with the sampler;
/// [`stop`](Self::stop) unregisters it. The observer runs on the sampler's
/// delivery thread and is called after the internal lock is released, so it
/// may read [`snapshot`](Self::snapshot) and the other getters.
///
/// Samples must reach the notifier from one delivery context at a time.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// use sensor_orientation::{ManualSampler, NotifierConfig, OrientationNotifier};
/// use sensor_types::{AccelerationSample, DeviceOrientation, InterfaceOrientation};
///
/// let sampler = ManualSampler::new();
/// let feed = sampler.feed();
/// let mut notifier = OrientationNotifier::new(sampler, NotifierConfig::default()).unwrap();
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// notifier
///     .start(Duration::from_millis(200), move |device, interface, _sample| {
///         sink.lock().unwrap().push((device, interface));
///     })
///     .unwrap();
///
/// feed.deliver(AccelerationSample::from_xyz(1.0, 0.0, 0.0));
/// assert_eq!(
///     seen.lock().unwrap().as_slice(),
///     &[(DeviceOrientation::LandscapeLeft, InterfaceOrientation::LandscapeRight)]
/// );
///
/// notifier.stop();
/// ```
pub struct OrientationNotifier<S: AccelerationSampler> {
    sampler: S,
    config: NotifierConfig,
    classifier: OrientationClassifier,
    session: Arc<Mutex<Session>>,
    state: NotifierState,
}

impl<S: AccelerationSampler> OrientationNotifier<S> {
    /// Creates an idle notifier.
    ///
    /// # Errors
    ///
    /// Returns [`OrientationError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn new(sampler: S, config: NotifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(sampler, config))
    }

    /// Creates an idle notifier with the default configuration.
    #[must_use]
    pub fn with_defaults(sampler: S) -> Self {
        Self::assemble(sampler, NotifierConfig::default())
    }

    fn assemble(sampler: S, config: NotifierConfig) -> Self {
        Self {
            sampler,
            classifier: OrientationClassifier::from_validated(config.classifier),
            session: Arc::new(Mutex::new(Session::new(&config))),
            config,
            state: NotifierState::Idle,
        }
    }

    /// Starts orientation updates.
    ///
    /// Resets both orientations to unknown and asks the sampler for samples
    /// every `interval`. With [`DeliveryPolicy::OnChange`] the observer is
    /// called each time the device orientation changes; with
    /// [`DeliveryPolicy::EverySample`] it is called for every sample.
    ///
    /// # Errors
    ///
    /// - [`OrientationError::AlreadyRunning`] if a session is active. The
    ///   running session and its state are left untouched.
    /// - [`OrientationError::InvalidConfig`] if `interval` is zero.
    /// - [`OrientationError::SamplerUnavailable`] if the sampler cannot
    ///   start. The notifier stays idle and keeps its last orientations.
    pub fn start<F>(&mut self, interval: Duration, observer: F) -> Result<()>
    where
        F: Fn(DeviceOrientation, InterfaceOrientation, Option<AccelerationSample>)
            + Send
            + Sync
            + 'static,
    {
        if self.state == NotifierState::Running {
            return Err(OrientationError::AlreadyRunning);
        }
        if interval.is_zero() {
            return Err(OrientationError::invalid_config(
                "sampling interval must be non-zero",
            ));
        }

        // The session only begins once the sampler accepts the handler, so a
        // failed start leaves the previous orientations in place.
        let generation = self.session.lock().next_generation();

        let session = Arc::clone(&self.session);
        let classifier = self.classifier;
        let config = self.config;
        let handler = Box::new(move |sample: AccelerationSample| {
            let emit = session
                .lock()
                .ingest(generation, &sample, &classifier, &config);
            if let Some((observer, state)) = emit {
                observer(state.device, state.interface, Some(sample));
            }
        });

        if let Err(err) = self.sampler.start_updates(interval, handler) {
            warn!(error = %err, "Accelerometer refused to start");
            return Err(err.into());
        }
        self.session.lock().begin(generation, Arc::new(observer));

        self.state = NotifierState::Running;
        info!(?interval, delivery = ?self.config.delivery, "Orientation updates started");
        Ok(())
    }

    /// Stops orientation updates. Does nothing when idle.
    ///
    /// The last known orientations stay readable after stopping.
    pub fn stop(&mut self) {
        if self.state == NotifierState::Idle {
            return;
        }

        // Mark the session ended first so a racing delivery becomes a no-op.
        self.session.lock().end();
        self.sampler.stop_updates();
        self.state = NotifierState::Idle;
        info!("Orientation updates stopped");
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> NotifierState {
        self.state
    }

    /// Returns `true` between a successful `start` and the next `stop`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == NotifierState::Running
    }

    /// Last confirmed device and interface orientation, read together.
    #[must_use]
    pub fn snapshot(&self) -> ClassifierState {
        self.session.lock().state
    }

    /// Last confirmed device orientation.
    #[must_use]
    pub fn device_orientation(&self) -> DeviceOrientation {
        self.snapshot().device
    }

    /// Last derived interface orientation.
    #[must_use]
    pub fn interface_orientation(&self) -> InterfaceOrientation {
        self.snapshot().interface
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// The owned sampler.
    #[must_use]
    pub const fn sampler(&self) -> &S {
        &self.sampler
    }

    /// The owned sampler, mutably. Starting or stopping it directly
    /// bypasses the notifier's lifecycle.
    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }
}

impl<S: AccelerationSampler> Drop for OrientationNotifier<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<S: AccelerationSampler + std::fmt::Debug> std::fmt::Debug for OrientationNotifier<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrientationNotifier")
            .field("sampler", &self.sampler)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("orientation", &self.snapshot())
            .finish()
    }
}
