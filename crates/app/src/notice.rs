use rate_core::{Diagnostic, DiagnosticSink, LogSink};

/// Keeps the latest warning for the on-screen notice line and logs every
/// diagnostic it receives.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    latest:   Option<Diagnostic>,
    repeats:  u64,
    log:      LogSink,
}

impl NoticeBoard {
    /// Text for the notice line, e.g. `Oversized report: … (×3)`.
    pub fn line(&self) -> Option<String> {
        let latest = self.latest.as_ref()?;
        Some(if self.repeats > 1 {
            format!("{latest} (×{})", self.repeats)
        } else {
            latest.to_string()
        })
    }
}

impl DiagnosticSink for NoticeBoard {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.latest.as_ref() == Some(&diagnostic) {
            self.repeats += 1;
        } else {
            self.repeats = 1;
            self.latest = Some(diagnostic.clone());
        }
        self.log.report(diagnostic);
    }
}
