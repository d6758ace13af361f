use crate::report::{Axis, RawEvent, ReportAssembler};
use evdev::{Device, InputEvent, InputEventKind, RelativeAxisType, Synchronization};
use rate_core::{MotionReport, RateError, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What the reader task forwards to the event loop.
#[derive(Debug)]
pub enum InputSignal {
    /// A complete report, stamped with the kernel time of its sync marker.
    Report {
        report:   MotionReport,
        captured: Instant,
    },
    /// One report was discarded; reading continues.
    Dropped(RateError),
    /// The device stopped delivering events; the task has exited.
    Closed(RateError),
}

/// An opened evdev node that reports relative X/Y motion.
pub struct PointerDevice {
    path:   PathBuf,
    name:   String,
    device: Device,
}

impl std::fmt::Debug for PointerDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerDevice")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PointerDevice {
    /// Open `path`, or the first pointing device under `/dev/input` when
    /// `None`.  Fails when nothing readable reports relative motion.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let device = Device::open(path).map_err(|e| {
                    RateError::Input(format!("cannot open '{}': {e}", path.display()))
                })?;
                if !is_pointer(&device) {
                    return Err(RateError::Input(format!(
                        "'{}' does not report relative X/Y motion",
                        path.display()
                    )));
                }
                Ok(Self::wrap(path.to_path_buf(), device))
            }
            None => evdev::enumerate()
                .find(|(_, device)| is_pointer(device))
                .map(|(path, device)| Self::wrap(path, device))
                .ok_or_else(|| {
                    RateError::Input(
                        "no readable device reports relative X/Y motion \
                         (is this user in the 'input' group?)"
                            .into(),
                    )
                }),
        }
    }

    fn wrap(path: PathBuf, device: Device) -> Self {
        let name = device.name().unwrap_or("unnamed device").to_string();
        Self { path, name, device }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawn a Tokio task that assembles reports from this device and
    /// forwards them on the returned channel.
    ///
    /// Sends await when the channel is full; every report already carries
    /// its capture instant, so queueing delay does not skew intervals.  The
    /// task stops when the receiver is dropped or the device fails.
    pub fn spawn_reader(self, max_report_events: usize, capacity: usize) -> mpsc::Receiver<InputSignal> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let Self { path, name, device } = self;

        tokio::spawn(async move {
            let mut stream = match device.into_event_stream() {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = tx
                        .send(InputSignal::Closed(RateError::Input(format!(
                            "cannot stream '{}': {e}",
                            path.display()
                        ))))
                        .await;
                    return;
                }
            };

            info!("Reading motion reports from '{name}' ({})", path.display());
            let mut assembler = ReportAssembler::new(max_report_events);

            loop {
                let event = match stream.next_event().await {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Device '{}' stopped: {e}", path.display());
                        let _ = tx.send(InputSignal::Closed(RateError::Io { source: e })).await;
                        return;
                    }
                };

                let Some(raw) = classify(&event) else { continue };
                let signal = match assembler.push(raw) {
                    Some(Ok(report)) => {
                        let captured =
                            capture_instant(event.timestamp(), SystemTime::now(), Instant::now());
                        InputSignal::Report { report, captured }
                    }
                    Some(Err(e)) => {
                        debug!("Dropping report: {e}");
                        InputSignal::Dropped(e)
                    }
                    None => continue,
                };

                if tx.send(signal).await.is_err() {
                    return; // all receivers dropped
                }
            }
        });

        rx
    }
}

/// Reports older than this are stamped at read time instead; the wall
/// clock has probably been stepped.
const MAX_EVENT_AGE: Duration = Duration::from_secs(1);

/// Map the kernel's wall-clock event time onto the monotonic clock.
///
/// Frames that queued in the kernel while the reader was descheduled keep
/// their original spacing.  Event times in the future count as "now".
fn capture_instant(event_time: SystemTime, read_wall: SystemTime, read_mono: Instant) -> Instant {
    let age = read_wall.duration_since(event_time).unwrap_or(Duration::ZERO);
    if age > MAX_EVENT_AGE {
        return read_mono;
    }
    read_mono.checked_sub(age).unwrap_or(read_mono)
}

fn is_pointer(device: &Device) -> bool {
    device.supported_relative_axes().map_or(false, |axes| {
        axes.contains(RelativeAxisType::REL_X) && axes.contains(RelativeAxisType::REL_Y)
    })
}

/// Map an evdev event onto report assembly; `None` for sync markers that
/// neither close nor invalidate a frame.
fn classify(event: &InputEvent) -> Option<RawEvent> {
    let value = event.value();
    let raw = match event.kind() {
        InputEventKind::RelAxis(RelativeAxisType::REL_X) => RawEvent::Motion { axis: Axis::X, value },
        InputEventKind::RelAxis(RelativeAxisType::REL_Y) => RawEvent::Motion { axis: Axis::Y, value },
        InputEventKind::RelAxis(RelativeAxisType::REL_WHEEL) => {
            RawEvent::Motion { axis: Axis::Wheel, value }
        }
        InputEventKind::RelAxis(RelativeAxisType::REL_HWHEEL) => {
            RawEvent::Motion { axis: Axis::HWheel, value }
        }
        InputEventKind::Synchronization(Synchronization::SYN_REPORT) => RawEvent::Sync,
        InputEventKind::Synchronization(Synchronization::SYN_DROPPED) => RawEvent::Dropped,
        InputEventKind::Synchronization(_) => return None,
        _ => RawEvent::Other,
    };
    Some(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;

    fn rel(axis: RelativeAxisType, value: i32) -> InputEvent {
        InputEvent::new(EventType::RELATIVE, axis.0, value)
    }

    fn syn(code: Synchronization) -> InputEvent {
        InputEvent::new(EventType::SYNCHRONIZATION, code.0, 0)
    }

    #[test]
    fn classifies_motion_axes() {
        assert_eq!(
            classify(&rel(RelativeAxisType::REL_X, -4)),
            Some(RawEvent::Motion { axis: Axis::X, value: -4 })
        );
        assert_eq!(
            classify(&rel(RelativeAxisType::REL_HWHEEL, 1)),
            Some(RawEvent::Motion { axis: Axis::HWheel, value: 1 })
        );
    }

    #[test]
    fn classifies_sync_markers() {
        assert_eq!(classify(&syn(Synchronization::SYN_REPORT)), Some(RawEvent::Sync));
        assert_eq!(classify(&syn(Synchronization::SYN_DROPPED)), Some(RawEvent::Dropped));
        assert_eq!(classify(&syn(Synchronization::SYN_CONFIG)), None);
    }

    #[test]
    fn queued_frames_keep_kernel_spacing() {
        let read_wall = SystemTime::now();
        let read_mono = Instant::now();
        // Two frames 1 ms apart, both read in the same batch.
        let older = read_wall - Duration::from_micros(1500);
        let newer = read_wall - Duration::from_micros(500);

        let a = capture_instant(older, read_wall, read_mono);
        let b = capture_instant(newer, read_wall, read_mono);
        assert_eq!(b.duration_since(a), Duration::from_millis(1));
        assert_eq!(read_mono.duration_since(b), Duration::from_micros(500));
    }

    #[test]
    fn skewed_event_times_fall_back_to_read_time() {
        let read_wall = SystemTime::now();
        let read_mono = Instant::now();
        let future = read_wall + Duration::from_secs(5);
        let stale = read_wall - Duration::from_secs(30);
        assert_eq!(capture_instant(future, read_wall, read_mono), read_mono);
        assert_eq!(capture_instant(stale, read_wall, read_mono), read_mono);
    }

    #[test]
    fn hi_res_wheel_counts_but_does_not_move() {
        assert_eq!(
            classify(&rel(RelativeAxisType::REL_WHEEL_HI_RES, 120)),
            Some(RawEvent::Other)
        );
    }
}
