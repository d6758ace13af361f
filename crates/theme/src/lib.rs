pub mod colors;

pub use colors::Color;

use rate_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Calling [`Theme::from_config`] is infallible: invalid color strings fall
/// back to the built-in palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub warning:    Color,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::NIGHT),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
            warning:    Color::from_hex(&cfg.warning).unwrap_or(Color::YELLOW),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
