// ── Subscription streams ──────────────────────────────────────────────────────
//
// Each free function acts as both the stream builder AND the identity key for
// `Subscription::run`/`run_with`.  Iced uses the function pointer (plus the
// hashed data) to deduplicate subscriptions across updates.

use futures::{channel::mpsc::Sender, SinkExt};
use iced::{event, mouse, window, Event};
use rate_config::{default_path, ConfigWatcher, InputConfig};
use rate_core::{Diagnostic, Message};
use rate_input::{InputSignal, PointerDevice};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Everything the raw reader needs; hashed to key its subscription.
#[derive(Debug, Clone, Hash)]
pub struct ReaderSpec {
    pub device:            Option<PathBuf>,
    pub max_report_events: usize,
    pub channel_capacity:  usize,
}

impl From<&InputConfig> for ReaderSpec {
    fn from(cfg: &InputConfig) -> Self {
        Self {
            device:            cfg.device.clone(),
            max_report_events: cfg.max_report_events,
            channel_capacity:  cfg.channel_capacity.max(1),
        }
    }
}

/// Opens the pointer device and forwards its reports.  A missing device or
/// a device that stops responding is reported once as `InputUnavailable`.
pub fn raw_input_stream(spec: &ReaderSpec) -> impl iced::futures::Stream<Item = Message> {
    let spec = spec.clone();

    iced::stream::channel(spec.channel_capacity, move |mut sender: Sender<Message>| async move {
        // Enumerating /dev/input does blocking I/O.
        let path = spec.device.clone();
        let opened = tokio::task::spawn_blocking(move || PointerDevice::open(path.as_deref())).await;

        let device = match opened {
            Ok(Ok(device)) => device,
            Ok(Err(e)) => {
                let _ = sender.send(Message::InputUnavailable(e.to_string())).await;
                return stall().await;
            }
            Err(e) => {
                let _ = sender
                    .send(Message::InputUnavailable(format!("device probe panicked: {e}")))
                    .await;
                return stall().await;
            }
        };

        info!("Using pointer device '{}' at {}", device.name(), device.path().display());
        let mut rx = device.spawn_reader(spec.max_report_events, spec.channel_capacity);

        while let Some(signal) = rx.recv().await {
            let message = match signal {
                InputSignal::Report { report, captured } => Message::Report { report, captured },
                InputSignal::Dropped(e) => Message::ReportDropped(Diagnostic::dropped_report(&e)),
                InputSignal::Closed(e) => Message::InputUnavailable(e.to_string()),
            };
            // Awaiting keeps every report; each already carries its capture time.
            if sender.send(message).await.is_err() {
                break;
            }
        }

        stall().await
    })
}

/// Watches the config file for writes and sends `ConfigReloaded`.
pub fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            info!("Config file {} changed", watcher.path().display());
            if sender.send(Message::ConfigReloaded).await.is_err() {
                break;
            }
        }

        warn!("Config watcher stopped; live reload disabled");
        stall().await
    })
}

/// Toolkit cursor motion, used only when no raw device is readable.
pub fn cursor_events() -> iced::Subscription<Message> {
    event::listen_with(cursor_moved)
}

fn cursor_moved(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::CursorMoved {
            x: position.x,
            y: position.y,
        }),
        _ => None,
    }
}

/// Keep a finished stream pending instead of ending it.
async fn stall() {
    loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_spec_clamps_channel_capacity() {
        let cfg = InputConfig {
            channel_capacity: 0,
            ..InputConfig::default()
        };
        let spec = ReaderSpec::from(&cfg);
        assert_eq!(spec.channel_capacity, 1);
        assert_eq!(spec.max_report_events, cfg.max_report_events);
    }

    #[test]
    fn reader_stream_outlives_its_spec() {
        let stream = {
            let spec = ReaderSpec::from(&InputConfig::default());
            raw_input_stream(&spec)
        };
        drop(stream);
    }
}
