use std::thread;
use std::time::Duration;

use rand::Rng;

/// Sleeps between upstream requests.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayPolicy {
    /// Lower bound (inclusive) of the random pause after a successful fetch.
    pub pacing_min: Duration,
    /// Upper bound (exclusive) of the random pause after a successful fetch.
    pub pacing_max: Duration,
    /// Pause after the upstream answered with an HTTP error status.
    pub after_http_error: Duration,
    /// Pause after any other fetch failure.
    pub after_failure: Duration,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self {
            pacing_min: Duration::from_secs(5),
            pacing_max: Duration::from_secs(10),
            after_http_error: Duration::from_secs(10),
            after_failure: Duration::from_secs(5),
        }
    }
}

impl DelayPolicy {
    /// A policy that never waits.
    pub fn none() -> Self {
        Self {
            pacing_min: Duration::ZERO,
            pacing_max: Duration::ZERO,
            after_http_error: Duration::ZERO,
            after_failure: Duration::ZERO,
        }
    }

    /// Uniform pick from `[pacing_min, pacing_max)`; collapses to `pacing_min` for an empty range.
    pub fn pacing_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.pacing_max <= self.pacing_min {
            return self.pacing_min;
        }
        let secs = rng.gen_range(self.pacing_min.as_secs_f64()..self.pacing_max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Blocks the job for a given duration.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Real wall-clock sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}
