//! mouse-rate — shows how often the pointing device delivers motion reports.
//!
//! Run with:  `RUST_LOG=info mouse-rate`

use anyhow::Result;
use rate_core::{Diagnostic, DiagnosticSink, LogSink};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("mouse-rate v{} starting", env!("CARGO_PKG_VERSION"));

    rate_app::run().map_err(|e| {
        LogSink.report(Diagnostic::fatal("Fatal Error", e.to_string()));
        e.into()
    })
}
