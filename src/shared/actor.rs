//! The config actor: sole owner of the live map.
//!
//! # State Transitions
//! ```text
//! Starting → Running: initial load succeeded and the loop was started
//! Running  → Stopped: shutdown fired, or every handle was dropped
//! ```
//!
//! A failed initial load never leaves `Starting`; no loop is spawned.
//! `Stopped` is terminal. The state is published on a watch channel so
//! handles can observe it after the actor has moved into its task.

use std::path::{Path, PathBuf};
use notify::RecommendedWatcher;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use crate::config::{decode_map, load_map, read_source, ConfigMap, ConfigResult, FileEvent};
use crate::lifecycle::shutdown::triggered;
use crate::observability::metrics;
use crate::shared::message::Request;

/// Lifecycle state of a [`ConfigActor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Constructed; the initial load has succeeded but the loop isn't running.
    Starting,
    /// The loop is serving requests.
    Running,
    /// The loop has exited.
    Stopped,
}

/// Owns the configuration map and serializes every read and reload.
pub struct ConfigActor {
    path: PathBuf,
    map: ConfigMap,
    state: watch::Sender<ActorState>,
}

impl ConfigActor {
    /// Perform the initial load. Fails without side effects if the file
    /// can't be read or decoded.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let map = match load_map(path) {
            Ok(map) => map,
            Err(e) => {
                metrics::record_reload(false);
                return Err(e);
            }
        };

        metrics::record_reload(true);
        metrics::record_key_count(map.len());
        tracing::info!(path = %path.display(), keys = map.len(), "Config loaded");

        let (state, _) = watch::channel(ActorState::Starting);
        Ok(Self {
            path: path.to_path_buf(),
            map,
            state,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ActorState {
        *self.state.borrow()
    }

    /// Receiver that keeps tracking the state once the actor is running.
    pub fn subscribe_state(&self) -> watch::Receiver<ActorState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: ActorState) {
        self.state.send_replace(state);
        tracing::debug!(path = %self.path.display(), state = ?state, "Config actor state changed");
    }

    /// Mark the actor running and spawn its loop on `runtime`.
    ///
    /// The state is `Running` by the time this returns.
    pub fn start(
        self,
        runtime: &Handle,
        shutdown: watch::Receiver<bool>,
        requests: mpsc::UnboundedReceiver<Request>,
        events: mpsc::UnboundedReceiver<FileEvent>,
        watcher: Option<RecommendedWatcher>,
    ) {
        self.set_state(ActorState::Running);
        runtime.spawn(self.run(shutdown, requests, events, watcher));
    }

    /// Re-read the backing file and replace the map wholesale.
    ///
    /// On failure the current map is left untouched.
    pub async fn reload(&mut self) -> ConfigResult<usize> {
        let loaded = match read_source(&self.path).await {
            Ok(content) => decode_map(&self.path, &content),
            Err(e) => Err(e),
        };
        self.install(loaded)
    }

    /// Reload in response to a write notification.
    ///
    /// An in-place save truncates before writing, and the truncation has its
    /// own notification. Empty contents are skipped; the write that follows
    /// brings another event.
    pub async fn reload_on_change(&mut self) {
        let loaded = match read_source(&self.path).await {
            Ok(content) if content.trim().is_empty() => {
                tracing::debug!(path = %self.path.display(), "Config file empty, waiting for the rest of the write");
                return;
            }
            Ok(content) => decode_map(&self.path, &content),
            Err(e) => Err(e),
        };

        if let Err(e) = self.install(loaded) {
            tracing::warn!(error = %e, "Can't reload config, keeping previous values");
        }
    }

    fn install(&mut self, loaded: ConfigResult<ConfigMap>) -> ConfigResult<usize> {
        match loaded {
            Ok(map) => {
                self.map = map;
                metrics::record_reload(true);
                metrics::record_key_count(self.map.len());
                tracing::info!(path = %self.path.display(), keys = self.map.len(), "Config reloaded");
                Ok(self.map.len())
            }
            Err(e) => {
                metrics::record_reload(false);
                Err(e)
            }
        }
    }

    /// Look up a key; missing keys yield the empty string.
    pub fn lookup(&self, key: &str) -> String {
        metrics::record_lookup();
        self.map.get(key).cloned().unwrap_or_default()
    }

    /// Run the event loop until shutdown fires or every handle is gone.
    ///
    /// `watcher` is only held so the OS watch lives exactly as long as the loop.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
        mut requests: mpsc::UnboundedReceiver<Request>,
        mut events: mpsc::UnboundedReceiver<FileEvent>,
        watcher: Option<RecommendedWatcher>,
    ) {
        if self.state() != ActorState::Running {
            self.set_state(ActorState::Running);
        }

        let mut events_open = true;

        loop {
            tokio::select! {
                _ = triggered(&mut shutdown) => {
                    tracing::debug!("Config actor received shutdown signal, exiting loop");
                    break;
                }
                event = events.recv(), if events_open => match event {
                    Some(FileEvent::Modified) => self.reload_on_change().await,
                    None => {
                        tracing::debug!("File event source closed, reloads disabled");
                        events_open = false;
                    }
                },
                request = requests.recv() => match request {
                    Some(request) => self.handle(request).await,
                    None => {
                        tracing::debug!("All config handles dropped, exiting loop");
                        break;
                    }
                },
            }
        }

        drop(watcher);
        // Close the inbox before publishing `Stopped`, so a caller that
        // observes `Stopped` can no longer enqueue anything.
        requests.close();
        drop(requests);
        self.set_state(ActorState::Stopped);
        tracing::info!(path = %self.path.display(), "Config actor stopped");
    }

    async fn handle(&mut self, request: Request) {
        // A send error means the caller gave up waiting; nothing to do.
        match request {
            Request::Get { key, reply } => {
                let value = self.lookup(&key);
                tracing::trace!(key = %key, "Config lookup");
                let _ = reply.send(value);
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(self.map.clone());
            }
            Request::Reload { reply } => {
                let result = self.reload().await;
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "Requested reload failed, keeping previous values");
                }
                let _ = reply.send(result);
            }
        }
    }
}
