pub mod schema;
pub mod watcher;

pub use schema::{
    DisplayConfig, FilterConfig, HistoryConfig, InputConfig, RateConfig, SchedulerConfig,
    ThemeConfig,
};
pub use watcher::ConfigWatcher;

use rate_core::{RateError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `RateConfig::default()` if
/// the file doesn't exist so the meter always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<RateConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(RateConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| RateError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<RateConfig> {
    toml::from_str(raw).map_err(|e| RateError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("mouse-rate").join("mouse-rate.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load("/nonexistent/mouse-rate/mouse-rate.toml").unwrap();
        assert_eq!(config.history.capacity, 1024);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = parse("[filter\nmin_interval_us = ").unwrap_err();
        assert!(matches!(err, RateError::Config(_)));
    }

    #[test]
    fn wrong_type_is_config_error() {
        let err = parse("[history]\ncapacity = \"lots\"").unwrap_err();
        assert!(err.to_string().starts_with("config error: TOML parse error"));
    }
}
