//! Raw pointer input for the rate meter.
//!
//! Reads evdev nodes directly so every hardware transmission arrives as its
//! own report, instead of the per-frame cursor positions a windowing toolkit
//! delivers.

pub mod device;
pub mod report;

pub use device::{InputSignal, PointerDevice};
pub use report::{Axis, RawEvent, ReportAssembler};
