//! Desktop window for `mouse-rate`.
//!
//! Owns the Iced application loop and wires together the event sources:
//! - evdev reader (raw motion reports), or toolkit cursor motion as fallback
//! - render-batching timer
//! - window resize and close requests
//! - config file watcher (live reload on change)
//!
//! All measurement state lives in one [`Session`] mutated only from
//! `update()`, one message at a time.

mod notice;
mod streams;

use iced::{
    widget::{container, image, stack, text},
    window, Element, Length, Size, Subscription, Task,
};
use notice::NoticeBoard;
use rate_config::{default_path, load as load_config, DisplayConfig, RateConfig};
use rate_core::{Diagnostic, DiagnosticSink, Message, MotionReport, RateError, Result, Session};
use rate_renderer::{Frame, Renderer, RowLayout};
use rate_theme::Theme;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use streams::{config_stream, cursor_events, raw_input_stream, ReaderSpec};
use tracing::info;

const TITLE: &str = "Mouse Rate";

// ── Entry point ───────────────────────────────────────────────────────────────

/// Load the config, open the window and run until it is closed.
///
/// Errors are startup failures: a config file that exists but does not
/// parse, a window that cannot be created, or no readable input device when
/// the cursor fallback is disabled.
pub fn run() -> Result<()> {
    let config = load_config(default_path())?;
    let size = Size::new(config.display.width as f32, config.display.height as f32);

    let fatal = Arc::new(OnceLock::new());
    let slot = Arc::clone(&fatal);

    iced::application(
        move || Meter::new(config.clone(), Arc::clone(&slot)),
        Meter::update,
        Meter::view,
    )
    .title(TITLE)
    .subscription(Meter::subscription)
    .style(Meter::style)
    .window_size(size)
    .exit_on_close_request(false)
    .run()
    .map_err(|e| RateError::Window(e.to_string()))?;

    match fatal.get() {
        Some(reason) => Err(RateError::Input(reason.clone())),
        None => Ok(()),
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Where motion reports come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// evdev reader; reports carry their kernel capture time.
    Raw,
    /// Toolkit cursor events; stamped on arrival in `update()`.
    Cursor,
    /// Nothing is measured.
    None,
}

struct Meter {
    theme:           Theme,
    session:         Session,
    renderer:        Renderer,
    frame:           Frame,
    /// Last client size reported by the toolkit.
    client:          (u32, u32),
    source:          Source,
    last_cursor:     Option<(f32, f32)>,
    notices:         NoticeBoard,
    // Fixed at startup; a reload does not restart the timer or the reader.
    tick:            Duration,
    reader:          ReaderSpec,
    cursor_fallback: bool,
    /// Why the meter gave up, read by `run()` after the loop ends.
    fatal:           Arc<OnceLock<String>>,
}

impl Meter {
    fn new(config: RateConfig, fatal: Arc<OnceLock<String>>) -> (Self, Task<Message>) {
        let theme = Theme::from_config(&config.theme);
        let session = Session::new(config.session_settings());
        let mut renderer = Renderer::new(&theme, layout(&config.display));
        let client = (config.display.width.max(1), config.display.height.max(1));

        // First paint: creates the surface and shows the empty counter.
        let frame = renderer.render(&session, client.0, client.1);

        info!(
            min_interval_us = config.filter.min_interval_us,
            capacity = config.history.capacity,
            tick_ms = config.scheduler.tick_ms,
            "session started"
        );

        let meter = Self {
            theme,
            session,
            renderer,
            frame,
            client,
            source: Source::Raw,
            last_cursor: None,
            notices: NoticeBoard::default(),
            tick: config.tick_interval(),
            reader: ReaderSpec::from(&config.input),
            cursor_fallback: config.input.cursor_fallback,
            fatal,
        };

        (meter, Task::none())
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Report { report, captured } => {
                if self.source == Source::Raw {
                    self.session.ingest(report, captured);
                }
            }
            Message::CursorMoved { x, y } => self.on_cursor(x, y, Instant::now()),
            Message::ReportDropped(diagnostic) => self.notices.report(diagnostic),
            Message::InputUnavailable(reason) => return self.on_input_unavailable(reason),
            Message::Resized { width, height } => {
                self.client = (width.max(1), height.max(1));
            }
            Message::Tick => {
                if self.session.tick() {
                    let (width, height) = self.client;
                    self.frame = self.renderer.render(&self.session, width, height);
                    self.session.render_completed();
                }
            }
            Message::ConfigReloaded => self.reload(),
            Message::CloseRequested => {
                info!(
                    samples = self.session.window().len(),
                    filtered = self.session.filtered_count(),
                    renders = self.session.scheduler().renders(),
                    "session closed"
                );
                return iced::exit();
            }
        }
        Task::none()
    }

    fn on_cursor(&mut self, x: f32, y: f32, now: Instant) {
        if self.source != Source::Cursor {
            return;
        }
        let (dx, dy) = match self.last_cursor {
            Some((px, py)) => ((x - px).round() as i32, (y - py).round() as i32),
            None => (0, 0),
        };
        self.last_cursor = Some((x, y));
        self.session.ingest(MotionReport::new(dx, dy), now);
    }

    fn on_input_unavailable(&mut self, reason: String) -> Task<Message> {
        if self.source == Source::Cursor {
            return Task::none();
        }

        if self.cursor_fallback {
            self.source = Source::Cursor;
            self.notices.report(Diagnostic::warning(
                "Raw input unavailable",
                format!("{reason}; measuring cursor motion (coarser)"),
            ));
            self.session.invalidate();
            return Task::none();
        }

        // `run()` turns this into its error; the caller logs it.
        self.source = Source::None;
        let _ = self.fatal.set(reason);
        iced::exit()
    }

    fn reload(&mut self) {
        match load_config(default_path()) {
            Ok(cfg) => self.apply_config(&cfg),
            Err(e) => self.notices.report(Diagnostic::warning("Config reload failed", e.to_string())),
        }
    }

    /// Apply the live-reloadable part of `cfg`: filter, history, row layout
    /// and theme.  Tick period, window size and `[input]` wait for a restart.
    fn apply_config(&mut self, cfg: &RateConfig) {
        info!("Config reloaded");
        self.theme = Theme::from_config(&cfg.theme);
        self.renderer.set_theme(&self.theme);
        self.renderer.set_layout(layout(&cfg.display));
        self.session.apply(cfg.session_settings());
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let surface = container(
            image(self.frame.handle.clone())
                .width(Length::Fixed(self.frame.width as f32))
                .height(Length::Fixed(self.frame.height as f32)),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        match self.notices.line() {
            Some(line) => {
                let notice = container(text(line).size(12).color(self.theme.warning.to_iced()))
                    .padding(8)
                    .width(Length::Fill)
                    .align_bottom(Length::Fill);
                stack![surface, notice].into()
            }
            None => surface.into(),
        }
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let tick = iced::time::every(self.tick).map(|_| Message::Tick);
        let resize = window::resize_events().map(|(_, size)| Message::Resized {
            width:  size.width.round() as u32,
            height: size.height.round() as u32,
        });
        let close = window::close_requests().map(|_| Message::CloseRequested);

        let input = match self.source {
            Source::Raw => {
                Subscription::run_with(self.reader.clone(), raw_input_stream)
            }
            Source::Cursor => cursor_events(),
            Source::None => Subscription::none(),
        };

        Subscription::batch([tick, resize, close, input, Subscription::run(config_stream)])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color:       self.theme.foreground.to_iced(),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn layout(display: &DisplayConfig) -> RowLayout {
    RowLayout::new(display.row_height, display.margin)
}
