//! Config and content file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_snapshot;
use crate::routing::SnapshotParts;

/// Watches the config file and the content snapshot it points to.
///
/// Each change reloads both and sends fresh `SnapshotParts`; a reload that
/// fails is logged and dropped, so the installed snapshot stays in place.
pub struct SnapshotWatcher {
    config_path: PathBuf,
    content_path: PathBuf,
    watched: [PathBuf; 2],
    update_tx: mpsc::UnboundedSender<SnapshotParts>,
}

impl SnapshotWatcher {
    /// Create a new SnapshotWatcher.
    ///
    /// Returns the watcher and a receiver for snapshot updates.
    pub fn new(
        config_path: &Path,
        content_path: &Path,
    ) -> (Self, mpsc::UnboundedReceiver<SnapshotParts>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                config_path: config_path.to_path_buf(),
                content_path: content_path.to_path_buf(),
                watched: [resolve_path(config_path), resolve_path(content_path)],
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        // Editors often replace files instead of writing them, so watch directories.
        let dirs: Vec<PathBuf> = {
            let mut dirs = vec![parent_dir(&self.config_path), parent_dir(&self.content_path)];
            dirs.dedup();
            dirs
        };
        let config_path = self.config_path.clone();
        let content_path = self.content_path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => self.handle_event(&event),
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for dir in &dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(
            config = %config_path.display(),
            content = %content_path.display(),
            "Snapshot watcher started"
        );
        Ok(watcher)
    }

    fn handle_event(&self, event: &Event) {
        if !(event.kind.is_modify() || event.kind.is_create()) || !self.concerns(event) {
            return;
        }

        tracing::info!(paths = ?event.paths, "Change detected, reloading snapshot");
        match load_snapshot(&self.config_path) {
            Ok((_, parts)) => {
                if self.update_tx.send(parts).is_err() {
                    tracing::warn!("Snapshot receiver dropped, discarding reload");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload snapshot. Keeping current snapshot.");
            }
        }
    }

    fn concerns(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|path| self.watched.contains(&resolve_path(path)))
    }
}

/// Absolute form of a file path for comparison with event paths.
///
/// Only the directory is canonicalized: the file itself may be mid-replace.
fn resolve_path(path: &Path) -> PathBuf {
    let dir = parent_dir(path);
    let dir = std::fs::canonicalize(&dir).unwrap_or(dir);
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
