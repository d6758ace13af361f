use rate_core::{
    filter::DEFAULT_MIN_INTERVAL, scheduler::DEFAULT_TICK, window::DEFAULT_CAPACITY,
    SessionSettings,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure parsed from `mouse-rate.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Duplicate-report filtering.
    pub filter: FilterConfig,
    /// Sample history bounds.
    pub history: HistoryConfig,
    /// Redraw batching.
    pub scheduler: SchedulerConfig,
    /// Window and row geometry.
    pub display: DisplayConfig,
    /// Raw input device selection.
    pub input: InputConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl RateConfig {
    /// Filter and history settings for the measurement session.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            min_interval: Duration::from_micros(self.filter.min_interval_us),
            capacity:     self.history.capacity,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.scheduler.tick_ms.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Reports closer than this to the newest accepted one are dropped.
    pub min_interval_us: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_interval_us: DEFAULT_MIN_INTERVAL.as_micros() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of accepted samples kept.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Timer period in milliseconds; read once at startup.
    pub tick_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK.as_millis() as u64,
        }
    }
}

/// Window size and text row geometry, in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial window width.
    pub width: u32,
    /// Initial window height.
    pub height: u32,
    /// Vertical distance between two rate rows.
    pub row_height: u32,
    /// Left inset of every row and top inset of the counter label.
    pub margin: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width:      240,
            height:     480,
            row_height: 16,
            margin:     8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Explicit evdev node, e.g. `/dev/input/event5`.  Unset = first device
    /// reporting relative X/Y motion.
    pub device: Option<PathBuf>,
    /// A frame with more events than this between two syncs is dropped.
    pub max_report_events: usize,
    /// Reports buffered between the reader task and the event loop.
    pub channel_capacity: usize,
    /// Measure toolkit cursor motion when no raw device can be opened.
    pub cursor_fallback: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device:            None,
            max_report_events: 16,
            channel_capacity:  256,
            cursor_fallback:   true,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Surface background color (hex, e.g. `"#03030f"`).
    pub background: String,
    /// Text color for rates and the counter.
    pub foreground: String,
    /// Text color for warning notices.
    pub warning: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#03030f".to_string(),
            foreground: "#ffffff".to_string(),
            warning:    "#f9e2af".to_string(), // Catppuccin Mocha yellow
        }
    }
}
