use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Quiet period that folds an editor's write/rename burst into one reload.
const SETTLE: Duration = Duration::from_millis(200);

/// Watches the config file and signals once per settled change.
///
/// The parent directory is watched rather than the file itself: editors that
/// save by renaming a temp file over the original would otherwise detach the
/// watch after the first save, and the file may not exist yet at startup.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path` on the current Tokio runtime.
    /// Returns the watcher handle and a receiver that fires on every change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };
    let Some(file_name) = path.file_name().map(|n| n.to_os_string()) else {
        error!("Config path '{}' has no file name", path.display());
        return;
    };

    let (raw_tx, mut raw_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = raw_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Cannot watch '{}' ({e}); live reload disabled", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    let touches_config = |event: &Event| {
        matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            && event.paths.iter().any(|p| p.file_name() == Some(file_name.as_os_str()))
    };

    while let Some(event) = raw_rx.recv().await {
        match event {
            Ok(e) if touches_config(&e) => {
                // Swallow the rest of the burst before signalling.
                while let Ok(Some(_)) = tokio::time::timeout(SETTLE, raw_rx.recv()).await {}
                debug!("Config change settled");
                if tx.send(()).await.is_err() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}
