//! Process-wide shutdown signal observed by pagination sessions.

use tokio::sync::watch;

/// Sending half of the shutdown signal, owned by the process entry point.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Receiving half of the shutdown signal. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Create a linked trigger/receiver pair.
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    /// Signal every [`Shutdown`] handle that the process is stopping.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Create another receiver bound to this trigger.
    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            rx: self.tx.subscribe(),
        }
    }
}

impl Shutdown {
    /// A handle that never fires, for callers without a process lifecycle.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // A closed channel keeps the last value; `wait` parks forever on it.
        drop(tx);
        Self { rx }
    }

    /// Whether shutdown has already been requested.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown is requested.
    ///
    /// Never resolves if the trigger was dropped without firing.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|stopping| *stopping).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
