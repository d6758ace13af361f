use crate::window::SampleWindow;
use std::time::{Duration, Instant};

/// Default minimum spacing between two accepted reports.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_micros(100);

/// Outcome of running a report through the [`SampleFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Rejects reports that arrive too soon after the newest accepted sample.
///
/// Sensors sometimes deliver coalesced or duplicated reports within a single
/// poll; their near-zero intervals would turn into meaningless rates.  The
/// test is purely temporal, the payload is never compared.
#[derive(Debug, Clone, Copy)]
pub struct SampleFilter {
    min_interval: Duration,
}

impl SampleFilter {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    #[inline]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn set_min_interval(&mut self, min_interval: Duration) {
        self.min_interval = min_interval;
    }

    /// Decide whether a report captured at `now` enters `window`.
    ///
    /// A report that is not strictly newer than the newest sample is always
    /// rejected, whatever the configured interval.
    pub fn decide(&self, window: &SampleWindow, now: Instant) -> Decision {
        let Some(newest) = window.newest() else {
            return Decision::Accept;
        };

        match now.checked_duration_since(newest.timestamp()) {
            Some(delta) if !delta.is_zero() && delta >= self.min_interval => Decision::Accept,
            _ => Decision::Reject,
        }
    }
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
