use rate_core::{MotionReport, RateError, Result};

/// Relative axes that contribute to a [`MotionReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Wheel,
    HWheel,
}

/// Device events reduced to what report assembly cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Motion { axis: Axis, value: i32 },
    /// End of one hardware report (`SYN_REPORT`).
    Sync,
    /// The kernel overran its buffer (`SYN_DROPPED`).
    Dropped,
    /// Any other event inside a frame (buttons, scan codes, hi-res wheel).
    Other,
}

/// Folds the events between two syncs into one [`MotionReport`].
///
/// Frames without motion (a bare button click) produce nothing.  Frames
/// carrying more than `max_events` events are rejected as a whole.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    pending:    MotionReport,
    events:     usize,
    motion:     bool,
    discarding: bool,
    max_events: usize,
}

impl ReportAssembler {
    pub fn new(max_events: usize) -> Self {
        Self {
            pending:    MotionReport::default(),
            events:     0,
            motion:     false,
            discarding: false,
            max_events,
        }
    }

    /// Feed one event.  Returns a finished report (or the reason it was
    /// dropped) whenever a frame closes.
    pub fn push(&mut self, event: RawEvent) -> Option<Result<MotionReport>> {
        match event {
            RawEvent::Dropped => {
                // Everything up to the next sync is unreliable.
                self.reset();
                self.discarding = true;
                Some(Err(RateError::MalformedReport(
                    "kernel event buffer overrun; frame discarded".into(),
                )))
            }
            RawEvent::Sync if self.discarding => {
                self.reset();
                None
            }
            RawEvent::Sync => self.finish(),
            _ if self.discarding => None,
            RawEvent::Motion { axis, value } => {
                self.events += 1;
                self.motion = true;
                let slot = match axis {
                    Axis::X => &mut self.pending.dx,
                    Axis::Y => &mut self.pending.dy,
                    Axis::Wheel => &mut self.pending.wheel,
                    Axis::HWheel => &mut self.pending.hwheel,
                };
                *slot = slot.saturating_add(value);
                None
            }
            RawEvent::Other => {
                self.events += 1;
                None
            }
        }
    }

    fn finish(&mut self) -> Option<Result<MotionReport>> {
        let events = self.events;
        let motion = self.motion;
        let report = self.pending;
        self.reset();

        if events > self.max_events {
            return Some(Err(RateError::OversizedReport {
                events,
                max: self.max_events,
            }));
        }
        motion.then_some(Ok(report))
    }

    fn reset(&mut self) {
        self.pending = MotionReport::default();
        self.events = 0;
        self.motion = false;
        self.discarding = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion(axis: Axis, value: i32) -> RawEvent {
        RawEvent::Motion { axis, value }
    }

    #[test]
    fn one_frame_one_report() {
        let mut asm = ReportAssembler::new(16);
        assert!(asm.push(motion(Axis::X, 3)).is_none());
        assert!(asm.push(motion(Axis::Y, -2)).is_none());
        let report = asm.push(RawEvent::Sync).unwrap().unwrap();
        assert_eq!(report, MotionReport::new(3, -2));
    }

    #[test]
    fn frame_without_motion_is_silent() {
        let mut asm = ReportAssembler::new(16);
        asm.push(RawEvent::Other);
        assert!(asm.push(RawEvent::Sync).is_none());
    }

    #[test]
    fn wheel_only_frame_is_a_report() {
        let mut asm = ReportAssembler::new(16);
        asm.push(motion(Axis::Wheel, 1));
        let report = asm.push(RawEvent::Sync).unwrap().unwrap();
        assert_eq!(report.wheel, 1);
        assert_eq!((report.dx, report.dy), (0, 0));
    }

    #[test]
    fn oversized_frame_is_rejected_and_forgotten() {
        let mut asm = ReportAssembler::new(4);
        for _ in 0..5 {
            asm.push(motion(Axis::X, 1));
        }
        let err = asm.push(RawEvent::Sync).unwrap().unwrap_err();
        assert!(matches!(err, RateError::OversizedReport { events: 5, max: 4 }));

        asm.push(motion(Axis::X, 7));
        let report = asm.push(RawEvent::Sync).unwrap().unwrap();
        assert_eq!(report.dx, 7);
    }

    #[test]
    fn dropped_discards_until_next_sync() {
        let mut asm = ReportAssembler::new(16);
        asm.push(motion(Axis::X, 1));
        assert!(matches!(
            asm.push(RawEvent::Dropped),
            Some(Err(RateError::MalformedReport(_)))
        ));
        assert!(asm.push(motion(Axis::X, 100)).is_none());
        assert!(asm.push(RawEvent::Sync).is_none());

        asm.push(motion(Axis::Y, 2));
        assert_eq!(asm.push(RawEvent::Sync).unwrap().unwrap(), MotionReport::new(0, 2));
    }
}
