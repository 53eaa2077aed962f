//! Single-flight registry for expensive keyed work.
//!
//! Concurrent requests for the same key share one spawned task. The task runs
//! to completion even if every caller stops waiting, so a caller that times
//! out never cancels work other callers are relying on.

use crate::error::{LookupError, Result};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Type alias for an outcome every waiter can await.
type SharedOutcome<V> = Shared<BoxFuture<'static, Result<V>>>;

pub(crate) struct InFlight<K, V> {
    pending: Mutex<HashMap<K, SharedOutcome<V>>>,
}

impl<K, V> InFlight<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Await the work registered for `key`, starting `work` if there is none.
    ///
    /// `recheck` runs while the registry is locked and short-circuits with an
    /// already published value. `work` must publish its own result before it
    /// completes: the key is released only after `work` finishes, so a caller
    /// that misses the registry is guaranteed to find the published value.
    pub(crate) async fn join_or_spawn<R, W>(self: &Arc<Self>, key: K, recheck: R, work: W) -> Result<V>
    where
        R: Future<Output = Option<V>>,
        W: Future<Output = Result<V>> + Send + 'static,
    {
        let outcome = {
            let mut pending = self.pending.lock().await;

            if let Some(value) = recheck.await {
                return Ok(value);
            }

            if let Some(existing) = pending.get(&key) {
                tracing::debug!("Awaiting in-flight work for {:?}", key);
                existing.clone()
            } else {
                let outcome = self.spawn(key.clone(), work);
                pending.insert(key, outcome.clone());
                outcome
            }
        };

        outcome.await
    }

    fn spawn<W>(self: &Arc<Self>, key: K, work: W) -> SharedOutcome<V>
    where
        W: Future<Output = Result<V>> + Send + 'static,
    {
        let registry = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let result = AssertUnwindSafe(work)
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(LookupError::Interrupted(format!("work for {:?} panicked", key))));

            registry.pending.lock().await.remove(&key);
            result
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(LookupError::Interrupted(e.to_string())))
        }
        .boxed()
        .shared()
    }

    /// Number of keys with work in progress.
    pub(crate) async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Check if work is in progress for `key`.
    pub(crate) async fn contains(&self, key: &K) -> bool {
        self.pending.lock().await.contains_key(key)
    }
}
