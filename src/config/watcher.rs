//! Configuration file watcher for hot reload.
//!
//! An in-place save usually truncates the file and then writes it, and each
//! step raises its own data-modification event. The actor skips a reload
//! that finds the file empty instead of counting it as a failure; the write
//! that completes the save arrives as a second event.

use std::path::{Path, PathBuf};
use std::time::Duration;
use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use crate::config::error::ConfigResult;

/// Notification delivered to the actor's event inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEvent {
    /// The backing file's contents were written.
    Modified,
}

/// A watcher that monitors exactly one configuration file for writes.
pub struct ConfigWatcher {
    path: PathBuf,
    event_tx: mpsc::UnboundedSender<FileEvent>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for file-change notifications.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<FileEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        (Self {
            path: path.to_path_buf(),
            event_tx,
        }, event_rx)
    }

    /// Register the watch. Notifications are delivered from notify's own thread.
    ///
    /// The returned watcher must be kept alive for as long as events are wanted.
    pub fn run(self) -> ConfigResult<RecommendedWatcher> {
        let tx = self.event_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if is_content_change(&event.kind) {
                        tracing::debug!(path = %path.display(), "Config file write detected");
                        // The actor is gone once the receiver closes; nothing left to notify.
                        let _ = tx.send(FileEvent::Modified);
                    } else {
                        tracing::trace!(kind = ?event.kind, "Ignoring config file event");
                    }
                }
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// Only data writes count; rename, remove, chmod and access are ignored.
pub fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode};

    #[test]
    fn test_only_writes_trigger_reload() {
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Data(DataChange::Content))));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Data(DataChange::Any))));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Any)));

        assert!(!is_content_change(&EventKind::Modify(ModifyKind::Name(RenameMode::Any))));
        assert!(!is_content_change(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions))));
        assert!(!is_content_change(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(!is_content_change(&EventKind::Access(AccessKind::Any)));
    }

    #[tokio::test]
    async fn test_watch_missing_file_fails() {
        let (watcher, _rx) = ConfigWatcher::new(Path::new("/nonexistent/shared-config.json"));
        assert!(watcher.run().is_err());
    }
}
