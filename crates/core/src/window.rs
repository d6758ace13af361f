use crate::sample::Sample;
use std::collections::VecDeque;
use std::time::Instant;

/// Default number of samples kept in the history.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Bounded history of accepted samples, newest at index 0.
///
/// Timestamps strictly decrease from front to back.  Pushing beyond the
/// capacity drops the oldest samples; nothing else ever removes or reorders
/// entries.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl SampleWindow {
    /// A zero capacity is bumped to 1 so the newest sample is always kept
    /// for the filter to compare against.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a sample at the front, evicting from the back past capacity.
    pub fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.newest().map_or(true, |n| sample.timestamp() > n.timestamp()),
            "samples must arrive in strictly increasing time order"
        );
        self.samples.push_front(sample);
        self.samples.truncate(self.capacity);
    }

    /// Change the capacity, truncating immediately when it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.samples.truncate(self.capacity);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    /// Newest-to-oldest iteration.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator + '_ {
        self.samples.iter()
    }

    /// Timestamps, newest first.
    pub fn timestamps(&self) -> impl Iterator<Item = Instant> + '_ {
        self.samples.iter().map(Sample::timestamp)
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::MotionReport;
    use std::time::Duration;

    fn sample_at(base: Instant, us: u64) -> Sample {
        Sample::new(base + Duration::from_micros(us), MotionReport::new(1, 0))
    }

    #[test]
    fn push_keeps_newest_first() {
        let base = Instant::now();
        let mut window = SampleWindow::new(8);
        for us in [0, 200, 400] {
            window.push(sample_at(base, us));
        }
        let offsets: Vec<_> = window
            .timestamps()
            .map(|t| t.duration_since(base).as_micros())
            .collect();
        assert_eq!(offsets, vec![400, 200, 0]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let base = Instant::now();
        let mut window = SampleWindow::new(DEFAULT_CAPACITY);
        for i in 0..3000u64 {
            window.push(sample_at(base, i * 1000));
            assert!(window.len() <= DEFAULT_CAPACITY);
        }
        assert_eq!(window.len(), DEFAULT_CAPACITY);
        // The oldest survivor is exactly `capacity` pushes back.
        let oldest = window.iter().last().map(Sample::timestamp);
        assert_eq!(oldest, Some(base + Duration::from_micros((3000 - 1024) * 1000)));
    }

    #[test]
    fn ordering_is_strict_after_eviction() {
        let base = Instant::now();
        let mut window = SampleWindow::new(16);
        for i in 0..100u64 {
            window.push(sample_at(base, i * 125));
        }
        let stamps: Vec<_> = window.timestamps().collect();
        assert!(stamps.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn shrinking_capacity_drops_oldest() {
        let base = Instant::now();
        let mut window = SampleWindow::new(10);
        for i in 0..10u64 {
            window.push(sample_at(base, i * 1000));
        }
        window.set_capacity(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window.newest().map(Sample::timestamp), Some(base + Duration::from_micros(9000)));
    }

    #[test]
    fn zero_capacity_still_keeps_newest() {
        let base = Instant::now();
        let mut window = SampleWindow::new(0);
        window.push(sample_at(base, 0));
        window.push(sample_at(base, 500));
        assert_eq!(window.len(), 1);
        assert_eq!(window.capacity(), 1);
    }
}
