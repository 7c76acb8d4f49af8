//! Policy Cache Module
//!
//! Main cache engine combining the [`Store`] with an [`EvictionPolicy`]
//! tracker, a [`Capacity`] bound, statistics and an eviction listener.

use std::fmt;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::cache::policy::{EvictionPolicy, PolicyKind, UnboundedPolicy};
use crate::cache::{CacheStats, Capacity, EvictionListener, Store, TracingListener};
use crate::error::{CacheError, Result};

// == Policy Cache ==
/// Bounded key-value cache with a pluggable eviction policy.
///
/// Every store mutation is paired with exactly one tracker hook inside the
/// same call, so between public operations the tracker's key set equals the
/// store's and the store never holds more than `capacity` entries.
///
/// ```
/// use policy_cache::cache::{Capacity, PolicyCache, PolicyKind};
///
/// let mut cache = PolicyCache::new(PolicyKind::Lru, Capacity::bounded(2)?)?;
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
/// cache.put("c", 3);
///
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.get(&"a"), Some(&1));
/// # Ok::<(), policy_cache::error::CacheError>(())
/// ```
pub struct PolicyCache<K, V> {
    /// Key-value storage
    store: Store<K, V>,
    /// Eviction bookkeeping
    policy: Box<dyn EvictionPolicy<K>>,
    /// Maximum number of entries allowed
    capacity: Capacity,
    /// Receives every evicted key
    listener: Box<dyn EvictionListener<K>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> PolicyCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache using one of the built-in policies.
    ///
    /// Fails if the unbounded policy is given a bounded capacity.
    pub fn new(kind: PolicyKind, capacity: Capacity) -> Result<Self> {
        Self::with_policy(kind.build(), capacity)
    }

    /// Creates a bounded cache holding at most `max_entries` entries.
    ///
    /// Fails if `max_entries` is zero.
    pub fn bounded(kind: PolicyKind, max_entries: usize) -> Result<Self> {
        Self::new(kind, Capacity::bounded(max_entries)?)
    }

    /// Creates a cache that never evicts.
    pub fn unbounded() -> Self {
        Self::from_parts(Box::new(UnboundedPolicy::new()), Capacity::Unbounded)
    }

    /// Creates a cache around a caller-supplied tracker.
    ///
    /// The tracker must be empty. A policy that cannot pick victims only
    /// accepts [`Capacity::Unbounded`].
    pub fn with_policy(policy: Box<dyn EvictionPolicy<K>>, capacity: Capacity) -> Result<Self> {
        if !policy.kind().is_bounded() && capacity.is_bounded() {
            return Err(CacheError::InvalidConfig(format!(
                "the {} policy cannot enforce a capacity of {}",
                policy.kind(),
                capacity
            )));
        }
        if !policy.is_empty() {
            return Err(CacheError::InvalidConfig(
                "eviction policy must start with no tracked keys".to_string(),
            ));
        }
        Ok(Self::from_parts(policy, capacity))
    }

    fn from_parts(policy: Box<dyn EvictionPolicy<K>>, capacity: Capacity) -> Self {
        let store = match capacity.limit() {
            Some(limit) => Store::with_capacity(limit.min(4096)),
            None => Store::new(),
        };
        Self {
            store,
            policy,
            capacity,
            listener: Box::new(TracingListener),
            stats: CacheStats::new(),
        }
    }

    // == Listener ==
    /// Replaces the eviction listener, builder style.
    pub fn with_listener(mut self, listener: impl EvictionListener<K> + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Replaces the eviction listener.
    pub fn set_listener(&mut self, listener: impl EvictionListener<K> + 'static) {
        self.listener = Box::new(listener);
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// An existing key has its value overwritten and counts as a touch for
    /// the policy. A new key arriving at a full cache first evicts exactly
    /// one victim, which is reported to the listener. If no entry can be
    /// evicted the new key is dropped and the cache is left unchanged.
    pub fn put(&mut self, key: K, value: V) {
        match self.store.replace(&key, value) {
            Ok(_) => {
                self.policy.on_update(&key);
                self.stats.record_update();
            }
            Err(value) => {
                if self.capacity.is_full(self.store.len()) && !self.evict_one() {
                    warn!(
                        policy = %self.policy.kind(),
                        key = ?key,
                        "cache full and nothing evicted, dropping put"
                    );
                    return;
                }
                self.policy.on_insert(&key);
                self.store.insert(key, value);
                self.stats.record_insert();
            }
        }
        self.stats.set_total_entries(self.store.len());
    }

    /// Like [`put`](Self::put), but an absent key or value is silently
    /// ignored and nothing changes.
    pub fn put_opt(&mut self, key: Option<K>, value: Option<V>) {
        if let (Some(key), Some(value)) = (key, value) {
            self.put(key, value);
        }
    }

    // == Get ==
    /// Retrieves a value by key, updating the policy's ordering for
    /// policies where reads count.
    ///
    /// Returns `None` on a miss. The store itself is never modified.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.store.contains(key) {
            self.stats.record_miss();
            return None;
        }
        self.policy.on_read(key);
        self.stats.record_hit();
        self.store.get(key)
    }

    /// Like [`get`](Self::get); an absent key is a miss.
    pub fn get_opt(&mut self, key: Option<&K>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Looks a value up without touching the policy or the statistics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    // == Accessors ==
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    /// Snapshot of the current entries in the policy's tracked order.
    ///
    /// For evicting policies the next victim comes first. FIFO and the
    /// unbounded policy list keys in insertion order.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.policy
            .keys()
            .into_iter()
            .filter_map(|key| self.store.get(key).map(|value| (key, value)))
            .collect()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    /// Diagnostic: checks that the tracker and the store agree on the key
    /// set and that the capacity holds. Only meant for tests.
    #[doc(hidden)]
    pub fn tracker_matches_store(&self) -> bool {
        let keys = self.policy.keys();
        keys.len() == self.store.len()
            && self.policy.len() == self.store.len()
            && keys.iter().all(|key| self.store.contains(key))
            && self
                .capacity
                .limit()
                .map_or(true, |limit| self.store.len() <= limit)
    }

    // == Eviction ==
    /// Returns whether an entry was actually removed from the store.
    fn evict_one(&mut self) -> bool {
        let Some(victim) = self.policy.select_victim() else {
            warn!(
                policy = %self.policy.kind(),
                len = self.store.len(),
                "cache full but policy selected no victim"
            );
            return false;
        };

        if self.store.remove(&victim).is_none() {
            warn!(
                policy = %self.policy.kind(),
                victim = ?victim,
                "policy selected a key that is not stored"
            );
            return false;
        }
        self.stats.record_eviction();
        debug!(policy = %self.policy.kind(), evicted = ?victim, "evicted entry");
        self.listener.on_evict(&victim);
        true
    }
}

impl<K, V> fmt::Debug for PolicyCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyCache")
            .field("policy", &self.policy)
            .field("capacity", &self.capacity)
            .field("store", &self.store)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
