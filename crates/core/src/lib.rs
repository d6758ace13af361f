pub mod diagnostic;
pub mod error;
pub mod event;
pub mod filter;
pub mod rate;
pub mod sample;
pub mod scheduler;
pub mod session;
pub mod window;

pub use diagnostic::{Diagnostic, DiagnosticSink, LogSink, Severity};
pub use error::{RateError, Result};
pub use event::Message;
pub use filter::{Decision, SampleFilter};
pub use rate::{instantaneous_rates, Rate};
pub use sample::{MotionReport, Sample};
pub use scheduler::{RenderScheduler, RenderState};
pub use session::{Session, SessionSettings};
pub use window::SampleWindow;
