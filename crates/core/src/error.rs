use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("config error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("report carries {events} events (max {max})")]
    OversizedReport { events: usize, max: usize },

    #[error("malformed report: {0}")]
    MalformedReport(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = RateError> = std::result::Result<T, E>;
