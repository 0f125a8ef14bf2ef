//! Shutdown coordination.
//!
//! The signal task triggers; the HTTP server (and tests that spawn one)
//! subscribe and stop accepting once the trigger fires.

use tokio::sync::broadcast;

/// Broadcast handle for graceful shutdown.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Trigger once `signal` completes.
    pub async fn trigger_on<F>(&self, signal: F)
    where
        F: std::future::Future<Output = ()>,
    {
        signal.await;
        tracing::info!(listeners = self.receiver_count(), "Triggering shutdown");
        self.trigger();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
