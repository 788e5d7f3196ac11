//! Caller-facing handle to a running config actor.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use notify::RecommendedWatcher;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use crate::config::{ConfigError, ConfigMap, ConfigResult, ConfigWatcher, FileEvent};
use crate::lifecycle::Shutdown;
use crate::shared::actor::{ActorState, ConfigActor};
use crate::shared::message::Request;

/// A process-wide, hot-reloadable key/value configuration backed by one file.
///
/// Cloning is cheap: every clone talks to the same actor. The handle carries
/// no configuration data itself.
///
/// Lookups never fail. A missing key, a closed config, and a backing file
/// that currently fails to reload are indistinguishable to readers; all of
/// them yield the empty string (or the last good value, for a failed reload).
#[derive(Clone)]
pub struct SharedConfig {
    path: Arc<PathBuf>,
    shutdown: Shutdown,
    requests: mpsc::UnboundedSender<Request>,
    state: watch::Receiver<ActorState>,
}

impl SharedConfig {
    /// Load `path`, start watching it for writes, and spawn the actor.
    ///
    /// Must be called from inside a Tokio runtime. Fails if the file can't be
    /// read or decoded, or if the watch can't be registered; nothing is left
    /// running in that case.
    pub fn new(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        let path = path.as_ref();

        let actor = ConfigActor::load(path)?;
        let (watcher, events) = ConfigWatcher::new(path);
        let watcher = watcher.run()?;

        Ok(Self::spawn(&runtime, path, actor, events, Some(watcher)))
    }

    /// Like [`SharedConfig::new`], but reloads are driven by `events` instead
    /// of a filesystem watch.
    pub fn with_events(
        path: impl AsRef<Path>,
        events: mpsc::UnboundedReceiver<FileEvent>,
    ) -> ConfigResult<Self> {
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        let path = path.as_ref();

        let actor = ConfigActor::load(path)?;

        Ok(Self::spawn(&runtime, path, actor, events, None))
    }

    fn spawn(
        runtime: &Handle,
        path: &Path,
        actor: ConfigActor,
        events: mpsc::UnboundedReceiver<FileEvent>,
        watcher: Option<RecommendedWatcher>,
    ) -> Self {
        let shutdown = Shutdown::new();
        let (requests, inbox) = mpsc::unbounded_channel();

        let state = actor.subscribe_state();
        actor.start(runtime, shutdown.subscribe(), inbox, events, watcher);

        Self {
            path: Arc::new(path.to_path_buf()),
            shutdown,
            requests,
            state,
        }
    }

    /// Value for `key`, or the empty string if it's absent or the config is closed.
    pub async fn get(&self, key: &str) -> String {
        if self.shutdown.is_triggered() {
            return String::new();
        }

        let (reply, rx) = oneshot::channel();
        if self.requests.send(Request::Get { key: key.to_string(), reply }).is_err() {
            return String::new();
        }

        // The actor drops unanswered requests when it stops.
        rx.await.unwrap_or_default()
    }

    /// Blocking variant of [`SharedConfig::get`] for threads outside the runtime.
    ///
    /// # Panics
    /// Panics if called from within an asynchronous execution context.
    pub fn get_blocking(&self, key: &str) -> String {
        if self.shutdown.is_triggered() {
            return String::new();
        }

        let (reply, rx) = oneshot::channel();
        if self.requests.send(Request::Get { key: key.to_string(), reply }).is_err() {
            return String::new();
        }

        rx.blocking_recv().unwrap_or_default()
    }

    /// Copy of the whole map as of one actor turn. Empty once closed.
    pub async fn snapshot(&self) -> ConfigMap {
        if self.shutdown.is_triggered() {
            return ConfigMap::new();
        }

        let (reply, rx) = oneshot::channel();
        if self.requests.send(Request::Snapshot { reply }).is_err() {
            return ConfigMap::new();
        }

        rx.await.unwrap_or_default()
    }

    /// Reload the backing file now, without waiting for a change notification.
    ///
    /// Returns the new key count. On failure the previous values stay live.
    pub async fn reload(&self) -> ConfigResult<usize> {
        if self.shutdown.is_triggered() {
            return Err(ConfigError::Closed);
        }

        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request::Reload { reply })
            .map_err(|_| ConfigError::Closed)?;

        rx.await.map_err(|_| ConfigError::Closed)?
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any clone of this handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Lifecycle state of the actor behind this handle.
    ///
    /// `Running` from construction until the loop exits, then `Stopped`.
    /// Closing only requests the stop, so `Stopped` can lag behind `is_closed`.
    pub fn state(&self) -> ActorState {
        *self.state.borrow()
    }

    /// Wait until the actor's loop has exited.
    ///
    /// Returns immediately if it already has.
    pub async fn stopped(&self) {
        let mut state = self.state.clone();
        // An error means the actor is gone without publishing; it has stopped either way.
        let _ = state.wait_for(|s| *s == ActorState::Stopped).await;
    }

    /// Stop the actor. Does not wait for the loop to exit.
    ///
    /// Consumes the handle. Other clones keep compiling but every call on them
    /// now degrades to the empty value; closing one of them again is a no-op.
    pub fn close(self) {
        tracing::debug!(path = %self.path.display(), "Closing shared config");
        self.shutdown.trigger();
    }
}

impl fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedConfig")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .field("state", &self.state())
            .finish()
    }
}
