//! Eviction Notifications
//!
//! Side channel reporting which key a cache discarded. Listeners are
//! installed on the cache explicitly; nothing here is global.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

// == Eviction Listener ==
/// Receives the key of every entry a cache evicts.
pub trait EvictionListener<K>: Send + Sync {
    fn on_evict(&mut self, key: &K);
}

impl<K, F> EvictionListener<K> for F
where
    F: FnMut(&K) + Send + Sync,
{
    fn on_evict(&mut self, key: &K) {
        self(key)
    }
}

// == Tracing Listener ==
/// Emits one `DISCARD` log record per eviction. Default listener of a cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl<K> EvictionListener<K> for TracingListener
where
    K: Debug,
{
    fn on_evict(&mut self, key: &K) {
        info!(evicted = ?key, "DISCARD");
    }
}

// == Eviction Log ==
/// Shared, bounded record of evicted keys, oldest first.
///
/// Clones share the same buffer, so one clone can be handed to the cache as
/// its listener while another is read from elsewhere.
#[derive(Debug, Clone)]
pub struct EvictionLog<K> {
    inner: Arc<Mutex<VecDeque<K>>>,
    limit: usize,
}

impl<K> EvictionLog<K> {
    /// Keeps at most `limit` keys; older ones are dropped first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(limit.min(1024)))),
            limit,
        }
    }

    /// Keeps every evicted key.
    pub fn unbounded() -> Self {
        Self::with_limit(usize::MAX)
    }

    pub fn record(&self, key: K) {
        if self.limit == 0 {
            return;
        }
        let mut keys = self.lock();
        if keys.len() >= self.limit {
            keys.pop_front();
        }
        keys.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<K> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<K>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K: Clone> EvictionLog<K> {
    /// Copies the recorded keys without clearing them.
    pub fn keys(&self) -> Vec<K> {
        self.lock().iter().cloned().collect()
    }
}

impl<K> Default for EvictionLog<K> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K> EvictionListener<K> for EvictionLog<K>
where
    K: Clone + Send,
{
    fn on_evict(&mut self, key: &K) {
        self.record(key.clone());
    }
}
