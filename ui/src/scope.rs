//! Lifetime of a mounted view.
//!
//! Every fetch or mutation a page issues runs through [`ViewScope::run`].
//! Once the scope is torn down the pending future is dropped and `run`
//! yields `None`, so a late response can never reach page state.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    torn_down: AtomicBool,
    notify: Notify,
}

/// Cheap to clone; all clones share one lifetime.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    inner: Arc<Inner>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.inner.torn_down.load(Ordering::Acquire)
    }

    /// Marks the view as gone and wakes every pending [`run`](Self::run).
    pub fn teardown(&self) {
        if !self.inner.torn_down.swap(true, Ordering::AcqRel) {
            self.inner.notify.notify_waiters();
        }
    }

    /// Drives `fut` while the scope is alive. `None` means the result was
    /// abandoned.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent teardown is not missed.
        notified.as_mut().enable();
        if !self.is_active() {
            return None;
        }
        tokio::select! {
            biased;
            _ = &mut notified => None,
            output = fut => self.is_active().then_some(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn active_scope_returns_output() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn torn_down_scope_never_polls() {
        let scope = ViewScope::new();
        scope.teardown();
        let mut polled = false;
        let out = scope
            .run(async {
                polled = true;
            })
            .await;
        assert!(out.is_none());
        assert!(!polled);
    }

    #[tokio::test]
    async fn teardown_discards_pending_work() {
        let scope = ViewScope::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let waiting = tokio::spawn({
            let scope = scope.clone();
            async move { scope.run(rx).await }
        });
        tokio::task::yield_now().await;
        scope.teardown();
        // A late result must not surface.
        let _ = tx.send(1);

        assert!(waiting.await.unwrap().is_none());
        assert!(!scope.is_active());
    }

    #[tokio::test]
    async fn teardown_is_idempotent() {
        let scope = ViewScope::new();
        scope.teardown();
        scope.teardown();
        assert!(!scope.is_active());
    }
}
