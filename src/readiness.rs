//! Readiness signalling primitives.
//!
//! Every derived subnet carries a [`ReadinessSignal`] that the resource
//! emitter fires once the subnet's backing resources exist. Selection
//! queries hand back a [`CompositeReadiness`] so callers can wait on an
//! entire subnet group with a single handle.

use std::sync::Arc;
use tokio::sync::watch;

/// A completion handle indicating a provisioned resource is ready for
/// dependent operations.
///
/// The signal starts unset. [`mark_ready`](Self::mark_ready) is idempotent;
/// clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct ReadinessSignal {
    /// Shared sender so any clone can fire the signal.
    tx: Arc<watch::Sender<bool>>,
    /// Receiver used for waiting and polling.
    rx: watch::Receiver<bool>,
}

impl ReadinessSignal {
    /// Creates a new, unset readiness signal.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Marks the resource as ready, waking every waiter.
    pub fn mark_ready(&self) {
        let _ = self.tx.send_replace(true);
    }

    /// Returns true if the signal has fired.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Waits until the signal fires. Returns immediately if already ready.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        // The sender lives in self, so the channel cannot close while waiting.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for ReadinessSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// A fan-in barrier over a set of readiness signals.
///
/// Completion depends on every member signal; an empty composite is
/// trivially satisfied. The composite holds no resource-specific logic.
#[derive(Debug, Clone, Default)]
pub struct CompositeReadiness {
    /// Member signals, in the order they were added.
    signals: Vec<ReadinessSignal>,
}

impl CompositeReadiness {
    /// Creates an empty composite (trivially satisfied).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signals: Vec::new(),
        }
    }

    /// Builds a composite from an iterator of signals.
    #[must_use]
    pub fn aggregate<I>(signals: I) -> Self
    where
        I: IntoIterator<Item = ReadinessSignal>,
    {
        Self {
            signals: signals.into_iter().collect(),
        }
    }

    /// Adds a signal to the composite.
    pub fn add(&mut self, signal: ReadinessSignal) {
        self.signals.push(signal);
    }

    /// Returns true if every member signal has fired.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.signals.iter().all(ReadinessSignal::is_ready)
    }

    /// Waits until every member signal has fired.
    pub async fn wait(&self) {
        for signal in &self.signals {
            signal.wait().await;
        }
    }

    /// Returns the number of member signals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns true if the composite has no member signals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_starts_unset() {
        let signal = ReadinessSignal::new();
        assert!(!signal.is_ready());
    }

    #[test]
    fn test_mark_ready_is_idempotent() {
        let signal = ReadinessSignal::new();
        signal.mark_ready();
        signal.mark_ready();
        assert!(signal.is_ready());
    }

    #[test]
    fn test_clones_share_state() {
        let signal = ReadinessSignal::new();
        let clone = signal.clone();
        signal.mark_ready();
        assert!(clone.is_ready());
    }

    #[test]
    fn test_empty_composite_is_ready() {
        let composite = CompositeReadiness::new();
        assert!(composite.is_ready());
        assert!(composite.is_empty());
    }

    #[test]
    fn test_composite_requires_all_members() {
        let a = ReadinessSignal::new();
        let b = ReadinessSignal::new();
        let composite = CompositeReadiness::aggregate([a.clone(), b.clone()]);

        assert!(!composite.is_ready());
        a.mark_ready();
        assert!(!composite.is_ready());
        b.mark_ready();
        assert!(composite.is_ready());
    }

    #[tokio::test]
    async fn test_wait_resolves_when_ready() {
        let signal = ReadinessSignal::new();
        let composite = CompositeReadiness::aggregate([signal.clone()]);

        let waiter = tokio::spawn(async move {
            composite.wait().await;
        });

        signal.mark_ready();
        waiter.await.expect("waiter should finish");
    }

    #[tokio::test]
    async fn test_wait_on_empty_composite_returns_immediately() {
        CompositeReadiness::new().wait().await;
    }

    #[tokio::test]
    async fn test_wait_on_already_ready_signal() {
        let signal = ReadinessSignal::new();
        signal.mark_ready();
        signal.wait().await;
    }
}
