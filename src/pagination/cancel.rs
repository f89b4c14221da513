//! Session cancellation
//!
//! A `CancelHandle` is held by the caller; each session watches a
//! `CancelSignal` cloned from it. Built on `tokio::sync::watch` so any number
//! of sessions can observe one handle.

use tokio::sync::watch;

/// Caller side: flips the signal for every session watching it
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Create a handle that has not fired
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Cancel every session watching this handle
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check if `cancel` was called
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// A signal for one session
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Session side: resolves once the handle fires
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Check without waiting
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until cancelled; pends forever if the handle is dropped unfired
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
