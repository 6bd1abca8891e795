//! Shutdown coordination.

use tokio::sync::broadcast;

/// Owner-side handle that tells a running server to stop.
///
/// Servers hold a [`broadcast::Receiver`] from [`Shutdown::subscribe`]; the
/// owner (entry point or test) calls [`Shutdown::trigger`].
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. No-op when nothing is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of servers still listening for the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once the owner triggers or drops its [`Shutdown`].
pub async fn triggered(mut rx: broadcast::Receiver<()>) {
    // Err(Closed) means the sender is gone, which also ends the server.
    let _ = rx.recv().await;
}
