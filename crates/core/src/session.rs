use crate::{
    filter::{Decision, SampleFilter, DEFAULT_MIN_INTERVAL},
    rate::{instantaneous_rates, Rate},
    sample::{MotionReport, Sample},
    scheduler::RenderScheduler,
    window::{SampleWindow, DEFAULT_CAPACITY},
};
use std::time::{Duration, Instant};

/// Tunables for the filter and the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub min_interval: Duration,
    pub capacity:     usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            capacity:     DEFAULT_CAPACITY,
        }
    }
}

/// All measurement state for one display.
///
/// Owned by the view controller and handed by `&mut` to every event
/// handler; nothing here is shared or locked.
#[derive(Debug, Clone)]
pub struct Session {
    filter:    SampleFilter,
    window:    SampleWindow,
    filtered:  u64,
    scheduler: RenderScheduler,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            filter:    SampleFilter::new(settings.min_interval),
            window:    SampleWindow::new(settings.capacity),
            filtered:  0,
            scheduler: RenderScheduler::new(),
        }
    }

    /// Run one report captured at `now` through the filter.
    ///
    /// Accepted reports enter the history; rejected ones only bump the
    /// filtered counter.  Either way the display needs a redraw.
    pub fn ingest(&mut self, report: MotionReport, now: Instant) -> Decision {
        let decision = self.filter.decide(&self.window, now);
        match decision {
            Decision::Accept => self.window.push(Sample::new(now, report)),
            Decision::Reject => self.filtered += 1,
        }
        self.scheduler.mark_dirty();
        decision
    }

    /// Timer tick; `true` when the caller should render now.
    #[must_use]
    pub fn tick(&mut self) -> bool {
        self.scheduler.on_tick()
    }

    pub fn render_completed(&mut self) {
        self.scheduler.render_completed();
    }

    /// Force a redraw on the next tick without touching the history.
    pub fn invalidate(&mut self) {
        self.scheduler.mark_dirty();
    }

    /// Apply reloaded settings.  A smaller capacity truncates the history.
    pub fn apply(&mut self, settings: SessionSettings) {
        self.filter.set_min_interval(settings.min_interval);
        self.window.set_capacity(settings.capacity);
        self.scheduler.mark_dirty();
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Reports rejected by the filter since the session started.
    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn rates(&self) -> impl Iterator<Item = Rate> + '_ {
        instantaneous_rates(&self.window)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::RenderState;

    fn at(base: Instant, us: u64) -> Instant {
        base + Duration::from_micros(us)
    }

    #[test]
    fn filters_fast_report_in_scenario() {
        let base = Instant::now();
        let mut session = Session::default();
        let decisions: Vec<_> = [0, 50, 200, 400]
            .into_iter()
            .map(|us| session.ingest(MotionReport::new(1, 1), at(base, us)))
            .collect();

        assert_eq!(
            decisions,
            vec![Decision::Accept, Decision::Reject, Decision::Accept, Decision::Accept]
        );
        assert_eq!(session.filtered_count(), 1);

        let window: Vec<_> = session
            .window()
            .timestamps()
            .map(|t| t.duration_since(base).as_micros())
            .collect();
        assert_eq!(window, vec![400, 200, 0]);

        let hz: Vec<_> = session.rates().map(|r| r.hz).collect();
        assert_eq!(hz, vec![5000, 5000]);
    }

    #[test]
    fn accepted_sample_keeps_its_report() {
        let base = Instant::now();
        let mut session = Session::default();
        let report = MotionReport { dx: -3, dy: 7, wheel: 1, hwheel: 0 };
        session.ingest(report, base);
        session.ingest(MotionReport::new(9, 9), at(base, 20));

        let newest = session.window().newest().map(|s| *s.report());
        assert_eq!(newest, Some(report));
    }

    #[test]
    fn rejection_leaves_window_untouched() {
        let base = Instant::now();
        let mut session = Session::default();
        session.ingest(MotionReport::default(), base);
        let before = session.window().len();

        for us in 1..100 {
            let filtered = session.filtered_count();
            assert_eq!(session.ingest(MotionReport::default(), at(base, us)), Decision::Reject);
            assert_eq!(session.filtered_count(), filtered + 1);
            assert_eq!(session.window().len(), before);
        }
    }

    #[test]
    fn any_report_marks_dirty() {
        let base = Instant::now();
        let mut session = Session::default();
        assert_eq!(session.scheduler().state(), RenderState::Clean);

        session.ingest(MotionReport::default(), base);
        assert!(session.tick());
        session.render_completed();
        assert!(!session.tick());

        // A rejected report is still worth a redraw: the counter changed.
        session.ingest(MotionReport::default(), at(base, 10));
        assert!(session.tick());
    }

    #[test]
    fn high_rate_stream_stays_bounded() {
        let base = Instant::now();
        let mut session = Session::default();
        let mut last_filtered = 0;
        // 8 kHz with a duplicate after every report.
        for i in 0..20_000u64 {
            session.ingest(MotionReport::new(1, 0), at(base, i * 125));
            session.ingest(MotionReport::new(1, 0), at(base, i * 125 + 5));
            assert!(session.window().len() <= DEFAULT_CAPACITY);
            assert!(session.filtered_count() >= last_filtered);
            last_filtered = session.filtered_count();
        }
        assert_eq!(session.filtered_count(), 20_000);
        assert!(session.rates().all(|r| r.hz == 8000));
    }

    #[test]
    fn apply_updates_filter_and_capacity() {
        let base = Instant::now();
        let mut session = Session::default();
        for i in 0..50u64 {
            session.ingest(MotionReport::default(), at(base, i * 1000));
        }
        session.apply(SessionSettings {
            min_interval: Duration::from_millis(2),
            capacity:     10,
        });
        assert_eq!(session.window().len(), 10);
        assert_eq!(
            session.ingest(MotionReport::default(), at(base, 49_000 + 1500)),
            Decision::Reject
        );
    }
}
