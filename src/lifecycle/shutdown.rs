//! Shutdown signal shared by the actor and its handles.

use std::sync::Arc;
use tokio::sync::watch;

/// One-way shutdown flag.
///
/// Once triggered it stays triggered. Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    /// Create a new, untriggered shutdown signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. Never blocks; repeated calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the signal has fired.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` observes the triggered flag, or once every sender is gone.
pub async fn triggered(rx: &mut watch::Receiver<bool>) {
    // `wait_for` errors only when the sender is dropped, which also means stop.
    let _ = rx.wait_for(|fired| *fired).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_trigger_is_sticky() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_triggered());

        shutdown.trigger();
        assert!(shutdown.is_triggered());

        shutdown.trigger();
        assert!(shutdown.is_triggered());
        assert!(shutdown.clone().is_triggered());
    }

    #[tokio::test]
    async fn test_subscriber_wakes() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        let waiter = tokio::spawn(async move {
            triggered(&mut rx).await;
        });

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("subscriber not woken")
            .unwrap();
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let mut rx = shutdown.subscribe();
        tokio::time::timeout(Duration::from_millis(100), triggered(&mut rx))
            .await
            .expect("late subscriber missed the trigger");
    }
}
