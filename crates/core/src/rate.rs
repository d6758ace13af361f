use crate::{sample::Sample, window::SampleWindow};
use std::time::Duration;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Instantaneous polling rate derived from one pair of adjacent samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    /// Rounded frequency in Hz.
    pub hz: u32,
    /// Interval between the pair, truncated to whole microseconds.
    pub interval_us: u64,
}

impl Rate {
    /// Rate for an interval, or `None` when it is shorter than one
    /// microsecond and would divide by zero.
    pub fn from_interval(interval: Duration) -> Option<Self> {
        let interval_us = u64::try_from(interval.as_micros()).unwrap_or(u64::MAX);
        if interval_us == 0 {
            return None;
        }
        let hz = (MICROS_PER_SECOND / interval_us as f64).round() as u32;
        Some(Self { hz, interval_us })
    }

    /// Rate between a newer and an older sample.  Out-of-order pairs yield
    /// `None` rather than a negative interval.
    pub fn between(newer: &Sample, older: &Sample) -> Option<Self> {
        newer
            .timestamp()
            .checked_duration_since(older.timestamp())
            .and_then(Self::from_interval)
    }
}

/// Rates for every adjacent pair in `window`, newest pair first.
///
/// The iterator is lazy: callers take only as many rows as they can show, so
/// the per-frame cost is bounded by the display rather than the history.
/// Degenerate pairs are skipped.
pub fn instantaneous_rates(window: &SampleWindow) -> impl Iterator<Item = Rate> + '_ {
    window
        .iter()
        .zip(window.iter().skip(1))
        .filter_map(|(newer, older)| {
            let rate = Rate::between(newer, older);
            if rate.is_none() {
                tracing::trace!("skipping degenerate sample interval");
            }
            rate
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::MotionReport;
    use std::time::Instant;

    fn window_from(offsets_us: &[u64]) -> SampleWindow {
        let base = Instant::now();
        let mut window = SampleWindow::default();
        for &us in offsets_us {
            window.push(Sample::new(base + Duration::from_micros(us), MotionReport::new(0, 1)));
        }
        window
    }

    #[test]
    fn rate_for_200us_is_5000hz() {
        let rate = Rate::from_interval(Duration::from_micros(200)).map(|r| r.hz);
        assert_eq!(rate, Some(5000));
    }

    #[test]
    fn rate_for_1ms_is_1000hz() {
        let rate = Rate::from_interval(Duration::from_micros(1000)).map(|r| r.hz);
        assert_eq!(rate, Some(1000));
    }

    #[test]
    fn rate_rounds_to_nearest() {
        // 1e6 / 3 = 333333.33…
        assert_eq!(Rate::from_interval(Duration::from_micros(3)).map(|r| r.hz), Some(333_333));
        // 1e6 / 7999 = 125.0156…
        assert_eq!(Rate::from_interval(Duration::from_micros(7999)).map(|r| r.hz), Some(125));
    }

    #[test]
    fn interval_truncates_to_whole_microseconds() {
        let rate = Rate::from_interval(Duration::from_nanos(1_999_900));
        assert_eq!(rate, Some(Rate { hz: 500, interval_us: 1999 }));
    }

    #[test]
    fn sub_microsecond_interval_is_skipped() {
        assert_eq!(Rate::from_interval(Duration::from_nanos(999)), None);
        assert_eq!(Rate::from_interval(Duration::ZERO), None);
    }

    #[test]
    fn rates_are_newest_pair_first() {
        let window = window_from(&[0, 1000, 1125, 2125]);
        let hz: Vec<_> = instantaneous_rates(&window).map(|r| r.hz).collect();
        assert_eq!(hz, vec![1000, 8000, 1000]);
    }

    #[test]
    fn single_sample_has_no_rate() {
        let window = window_from(&[0]);
        assert_eq!(instantaneous_rates(&window).count(), 0);
    }
}
