use crate::{diagnostic::Diagnostic, sample::MotionReport};
use std::time::Instant;

/// All messages (events) that flow through the application event loop.
///
/// Sources:
/// - evdev reader task     → `Report`, `ReportDropped`, `InputUnavailable`
/// - Windowing toolkit     → `CursorMoved`, `Resized`, `CloseRequested`
/// - Config watcher task   → `ConfigReloaded`
/// - Timer subscription    → `Tick`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Input ─────────────────────────────────────────────────────────────────
    /// One hardware report, stamped when it was read from the device.
    Report {
        report:   MotionReport,
        captured: Instant,
    },
    /// A report was discarded before reaching the filter.
    ReportDropped(Diagnostic),
    /// No raw device could be opened; carries the reason.
    InputUnavailable(String),
    /// Cursor position from the toolkit, used when no raw device is readable.
    CursorMoved { x: f32, y: f32 },

    // ── Window ────────────────────────────────────────────────────────────────
    /// Client area changed size (logical pixels).
    Resized { width: u32, height: u32 },
    /// The user asked to close the window.
    CloseRequested,

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Render-batching timer tick.
    Tick,
}
