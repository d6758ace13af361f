//! Off-screen drawing for the rate meter.
//!
//! Every render clears a pixel [`Surface`], rasterises the filtered-packet
//! counter and one row per instantaneous rate, then copies the finished
//! buffer into an immutable [`Frame`] for the window to display.

pub mod layout;
pub mod surface;

pub use layout::RowLayout;
pub use surface::Surface;

use embedded_graphics::{
    mono_font::{ascii::FONT_7X13, MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use iced::widget::image;
use rate_core::Session;
use rate_theme::{Color, Theme};
use std::fmt::Write as _;
use tracing::debug;

/// 13 px cells leave a gap inside the default 16 px rows.
const FONT: &MonoFont<'static> = &FONT_7X13;

/// A presented frame: the surface contents at the end of one render.
#[derive(Debug, Clone)]
pub struct Frame {
    pub handle: image::Handle,
    pub width:  u32,
    pub height: u32,
    /// Rate rows drawn below the label.
    pub rows:   usize,
}

/// Draws a [`Session`] into a lazily created surface sized to the client area.
#[derive(Debug)]
pub struct Renderer {
    surface:          Option<Surface>,
    layout:           RowLayout,
    background:       Rgb888,
    foreground:       Rgb888,
    surfaces_created: u64,
    text:             String,
}

impl Renderer {
    pub fn new(theme: &Theme, layout: RowLayout) -> Self {
        Self {
            surface:          None,
            layout,
            background:       to_rgb888(theme.background),
            foreground:       to_rgb888(theme.foreground),
            surfaces_created: 0,
            text:             String::new(),
        }
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.background = to_rgb888(theme.background);
        self.foreground = to_rgb888(theme.foreground);
    }

    pub fn set_layout(&mut self, layout: RowLayout) {
        self.layout = layout;
    }

    /// Current off-screen surface; `None` before the first render.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Surfaces allocated so far (first paint plus one per resize).
    pub fn surfaces_created(&self) -> u64 {
        self.surfaces_created
    }

    /// Render `session` for a client area of `width` × `height` pixels and
    /// present the result.
    pub fn render(&mut self, session: &Session, width: u32, height: u32) -> Frame {
        let layout = self.layout;
        let style = MonoTextStyle::new(FONT, self.foreground);
        let background = self.background;

        let surface = match self.surface.take() {
            Some(s) if s.width() == width && s.height() == height => self.surface.insert(s),
            previous => {
                if previous.is_some() {
                    debug!(width, height, "client area changed; recreating surface");
                }
                self.surfaces_created += 1;
                self.surface.insert(Surface::new(width, height))
            }
        };

        surface.fill(background);

        self.text.clear();
        let _ = write!(self.text, "Filtered packets: {}", session.filtered_count());
        let _ = Text::with_baseline(&self.text, layout.label_origin(), style, Baseline::Top)
            .draw(surface);

        let max_rows = layout.visible_rows(height);
        let mut rows = 0;
        for (row, rate) in session.rates().take(max_rows).enumerate() {
            self.text.clear();
            let _ = write!(self.text, "{}", rate.hz);
            let _ = Text::with_baseline(&self.text, layout.row_origin(row), style, Baseline::Top)
                .draw(surface);
            rows += 1;
        }

        debug!(rows, filtered = session.filtered_count(), "frame rendered");
        present(surface, rows)
    }
}

/// Copy the finished surface into an image handle in one step.  The caller
/// holds `&mut Renderer`, so nothing can draw into the surface mid-copy.
fn present(surface: &Surface, rows: usize) -> Frame {
    Frame {
        handle: image::Handle::from_rgba(
            surface.width(),
            surface.height(),
            surface.as_rgba().to_vec(),
        ),
        width: surface.width(),
        height: surface.height(),
        rows,
    }
}

fn to_rgb888(color: Color) -> Rgb888 {
    let [r, g, b] = color.to_rgb8();
    Rgb888::new(r, g, b)
}
