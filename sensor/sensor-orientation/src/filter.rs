//! Low-pass smoothing of the acceleration vector.

use sensor_types::AccelerationSample;

/// Exponential low-pass filter over acceleration samples.
///
/// Only the most recent filtered vector is kept. The first sample after
/// construction or [`reset`](Self::reset) seeds the filter unchanged.
#[derive(Debug, Clone)]
pub(crate) struct LowPassFilter {
    /// Fraction of the previous filtered vector kept each step.
    alpha: f64,
    filtered: Option<[f64; 3]>,
}

impl LowPassFilter {
    /// Creates a filter. `alpha` is clamped to `[0, 1)`; `0.0` passes
    /// samples through untouched.
    #[must_use]
    pub(crate) fn new(alpha: f64) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 0.999)
        } else {
            0.0
        };
        Self {
            alpha,
            filtered: None,
        }
    }

    /// Feeds a sample and returns it with the filtered acceleration.
    ///
    /// Non-finite samples are returned as-is and do not disturb the filter,
    /// so the classifier can reject them on its own.
    pub(crate) fn apply(&mut self, sample: &AccelerationSample) -> AccelerationSample {
        if self.alpha <= 0.0 || !sample.is_finite() {
            return *sample;
        }

        let next = match self.filtered {
            None => sample.acceleration,
            Some(prev) => {
                let mut out = [0.0; 3];
                for ((o, p), c) in out.iter_mut().zip(prev).zip(sample.acceleration) {
                    *o = self.alpha.mul_add(p, (1.0 - self.alpha) * c);
                }
                out
            }
        };

        self.filtered = Some(next);
        sample.with_acceleration(next)
    }

    /// Forgets the filtered vector.
    pub(crate) fn reset(&mut self) {
        self.filtered = None;
    }
}
