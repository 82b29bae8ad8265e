//! Accelerometer sample sources.
//!
//! The orientation core does not talk to hardware. It registers a handler
//! with an [`AccelerationSampler`] and classifies whatever that sampler
//! delivers, on whatever thread it delivers on.
//!
//! Two samplers ship with the crate:
//!
//! - [`ManualSampler`] - samples are pushed by the host through a
//!   [`SampleFeed`]. Useful when the platform already runs its own sensor
//!   callback, and for replaying recordings.
//! - [`ThreadSampler`] - polls a reading closure on a background thread at
//!   the requested interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sensor_types::{AccelerationSample, Timestamp};
use tracing::{debug, warn};

use crate::error::SamplerError;

/// Callback a sampler invokes for each sample.
pub type SampleHandler = Box<dyn FnMut(AccelerationSample) + Send + 'static>;

/// A source of periodic accelerometer samples.
pub trait AccelerationSampler {
    /// Starts delivering samples to `on_sample` roughly every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] if the sensor cannot be started.
    fn start_updates(
        &mut self,
        interval: Duration,
        on_sample: SampleHandler,
    ) -> Result<(), SamplerError>;

    /// Stops delivery and drops the handler. Must be safe to call when not
    /// started.
    fn stop_updates(&mut self);
}

impl<S: AccelerationSampler + ?Sized> AccelerationSampler for Box<S> {
    fn start_updates(
        &mut self,
        interval: Duration,
        on_sample: SampleHandler,
    ) -> Result<(), SamplerError> {
        (**self).start_updates(interval, on_sample)
    }

    fn stop_updates(&mut self) {
        (**self).stop_updates();
    }
}

type HandlerSlot = Arc<Mutex<Option<SampleHandler>>>;

/// Sampler driven by the host.
///
/// The host keeps a [`SampleFeed`] and pushes samples into it; they reach
/// the registered handler synchronously, on the caller's thread. See
/// [`SampleFeed`] for what the handler may not call.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sensor_orientation::{AccelerationSampler, ManualSampler};
/// use sensor_types::AccelerationSample;
///
/// let mut sampler = ManualSampler::new();
/// let feed = sampler.feed();
///
/// assert!(!feed.deliver(AccelerationSample::from_xyz(0.0, -1.0, 0.0)));
///
/// sampler
///     .start_updates(Duration::from_millis(200), Box::new(|_| {}))
///     .unwrap();
/// assert!(feed.deliver(AccelerationSample::from_xyz(0.0, -1.0, 0.0)));
/// ```
pub struct ManualSampler {
    slot: HandlerSlot,
    unavailable: Option<String>,
    interval: Option<Duration>,
}

impl ManualSampler {
    /// Creates an available sampler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            unavailable: None,
            interval: None,
        }
    }

    /// Creates a sampler whose `start_updates` always fails with
    /// [`SamplerError::Unavailable`], modelling a device without an
    /// accelerometer.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::new()
        }
    }

    /// Returns a handle for pushing samples.
    #[must_use]
    pub fn feed(&self) -> SampleFeed {
        SampleFeed {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Interval requested by the most recent successful `start_updates`.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Returns `true` while a handler is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl Default for ManualSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSampler")
            .field("active", &self.is_active())
            .field("unavailable", &self.unavailable)
            .field("interval", &self.interval)
            .finish()
    }
}

impl AccelerationSampler for ManualSampler {
    fn start_updates(
        &mut self,
        interval: Duration,
        on_sample: SampleHandler,
    ) -> Result<(), SamplerError> {
        if let Some(reason) = &self.unavailable {
            return Err(SamplerError::unavailable(reason.clone()));
        }
        *self.slot.lock() = Some(on_sample);
        self.interval = Some(interval);
        Ok(())
    }

    fn stop_updates(&mut self) {
        self.slot.lock().take();
    }
}

/// Handle for pushing samples into a [`ManualSampler`].
///
/// The handler runs while the feed's internal lock is held. Every method on
/// the feed and on its [`ManualSampler`] (including `is_active`,
/// `stop_updates` and the `Debug` output) takes that lock, so the handler
/// and any observer it calls must not touch the feed or the sampler at all.
#[derive(Clone)]
pub struct SampleFeed {
    slot: HandlerSlot,
}

impl SampleFeed {
    /// Delivers one sample. Returns `false` if no handler is registered.
    pub fn deliver(&self, sample: AccelerationSample) -> bool {
        let mut slot = self.slot.lock();
        match slot.as_mut() {
            Some(handler) => {
                handler(sample);
                true
            }
            None => false,
        }
    }

    /// Delivers samples in order, returning how many reached a handler.
    pub fn deliver_all(&self, samples: impl IntoIterator<Item = AccelerationSample>) -> usize {
        samples
            .into_iter()
            .map(|sample| self.deliver(sample))
            .filter(|delivered| *delivered)
            .count()
    }

    /// Returns `true` while a handler is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl std::fmt::Debug for SampleFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleFeed")
            .field("active", &self.is_active())
            .finish()
    }
}

struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Sampler that polls a reading closure on a background thread.
///
/// The closure returns the current acceleration in g, or `None` when no
/// reading is available (that tick is skipped). Samples are stamped with the
/// time elapsed since `start_updates`.
///
/// # Example
///
/// ```
/// use std::sync::mpsc;
/// use std::time::Duration;
/// use sensor_orientation::{AccelerationSampler, ThreadSampler};
///
/// let mut sampler = ThreadSampler::new(|| Some([0.0, -1.0, 0.0]));
/// let (tx, rx) = mpsc::channel();
///
/// sampler
///     .start_updates(Duration::from_millis(5), Box::new(move |s| {
///         let _ = tx.send(s);
///     }))
///     .unwrap();
///
/// let sample = rx.recv_timeout(Duration::from_secs(2)).unwrap();
/// assert!(sample.y() < -0.9);
/// sampler.stop_updates();
/// ```
pub struct ThreadSampler<F> {
    source: Arc<Mutex<F>>,
    worker: Option<Worker>,
}

impl<F> ThreadSampler<F>
where
    F: FnMut() -> Option<[f64; 3]> + Send + 'static,
{
    /// Creates a sampler around a reading closure.
    #[must_use]
    pub fn new(source: F) -> Self {
        Self {
            source: Arc::new(Mutex::new(source)),
            worker: None,
        }
    }

    /// Returns `true` while the polling thread is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl<F> std::fmt::Debug for ThreadSampler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadSampler")
            .field("running", &self.worker.is_some())
            .finish_non_exhaustive()
    }
}

impl<F> AccelerationSampler for ThreadSampler<F>
where
    F: FnMut() -> Option<[f64; 3]> + Send + 'static,
{
    fn start_updates(
        &mut self,
        interval: Duration,
        mut on_sample: SampleHandler,
    ) -> Result<(), SamplerError> {
        if self.worker.is_some() {
            return Err(SamplerError::backend("polling thread already running"));
        }

        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let source = Arc::clone(&self.source);

        let handle = thread::Builder::new()
            .name("accel-sampler".to_string())
            .spawn(move || {
                let epoch = Instant::now();
                let mut deadline = epoch;

                while !flag.load(Ordering::Acquire) {
                    let reading = {
                        let mut read = source.lock();
                        (*read)()
                    };
                    if let Some(acceleration) = reading {
                        let timestamp = Timestamp::from_elapsed(epoch.elapsed());
                        on_sample(AccelerationSample::new(timestamp, acceleration));
                    }

                    deadline += interval;
                    loop {
                        let now = Instant::now();
                        if now >= deadline {
                            // Fell behind; don't burst to catch up.
                            deadline = deadline.max(now);
                            break;
                        }
                        if flag.load(Ordering::Acquire) {
                            break;
                        }
                        thread::park_timeout(deadline - now);
                    }
                }
            })
            .map_err(|e| SamplerError::backend(format!("failed to spawn polling thread: {e}")))?;

        debug!(?interval, "Accelerometer polling started");
        self.worker = Some(Worker { stop, handle });
        Ok(())
    }

    fn stop_updates(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        worker.stop.store(true, Ordering::Release);
        worker.handle.thread().unpark();

        // Joining from the polling thread itself would deadlock.
        if worker.handle.thread().id() == thread::current().id() {
            return;
        }
        if worker.handle.join().is_err() {
            warn!("Accelerometer polling thread panicked");
        } else {
            debug!("Accelerometer polling stopped");
        }
    }
}

impl<F> Drop for ThreadSampler<F> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Release);
            worker.handle.thread().unpark();
            if worker.handle.thread().id() != thread::current().id() {
                let _ = worker.handle.join();
            }
        }
    }
}
