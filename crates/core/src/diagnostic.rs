use crate::error::RateError;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something was dropped; processing continues.
    Warning,
    /// Startup cannot continue.
    Fatal,
}

/// A `(title, message)` pair destined for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub title:    String,
    pub message:  String,
}

impl Diagnostic {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            title:    title.into(),
            message:  message.into(),
        }
    }

    pub fn fatal(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            title:    title.into(),
            message:  message.into(),
        }
    }

    /// Warning for a report that had to be dropped.
    pub fn dropped_report(err: &RateError) -> Self {
        let title = match err {
            RateError::OversizedReport { .. } => "Oversized report",
            RateError::MalformedReport(_) => "Malformed report",
            _ => "Input warning",
        };
        Self::warning(title, err.to_string())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Anything that can surface a [`Diagnostic`] to the user.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that writes diagnostics to the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => warn!(title = %diagnostic.title, "{}", diagnostic.message),
            Severity::Fatal => error!(title = %diagnostic.title, "{}", diagnostic.message),
        }
    }
}
