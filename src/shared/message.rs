//! Messages accepted by the config actor.

use tokio::sync::oneshot;
use crate::config::{ConfigMap, ConfigResult};

/// A request sent from a handle to the actor's inbox.
///
/// Every request carries its own reply channel. Dropping a request without
/// answering it (as happens when the actor stops) resolves the caller with
/// a receive error instead of leaving it parked.
#[derive(Debug)]
pub enum Request {
    /// Look up one key; missing keys answer with the empty string.
    Get {
        key: String,
        reply: oneshot::Sender<String>,
    },
    /// Copy the whole map in one actor turn.
    Snapshot {
        reply: oneshot::Sender<ConfigMap>,
    },
    /// Reload from disk now, answering with the new key count.
    Reload {
        reply: oneshot::Sender<ConfigResult<usize>>,
    },
}
