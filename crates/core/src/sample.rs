use std::time::Instant;

/// Relative motion carried by one hardware report.
///
/// The core never looks inside it; it only travels with the [`Sample`] so the
/// history holds what the device actually sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionReport {
    pub dx: i32,
    pub dy: i32,
    /// Vertical wheel detents.
    pub wheel: i32,
    /// Horizontal wheel detents.
    pub hwheel: i32,
}

impl MotionReport {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy, ..Self::default() }
    }
}

/// An accepted report stamped with the instant it was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    timestamp: Instant,
    report:    MotionReport,
}

impl Sample {
    pub fn new(timestamp: Instant, report: MotionReport) -> Self {
        Self { timestamp, report }
    }

    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    #[inline]
    pub fn report(&self) -> &MotionReport {
        &self.report
    }
}
