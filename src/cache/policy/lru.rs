//! LRU Policy
//!
//! Implements Least Recently Used tracking for cache eviction. Inserts,
//! overwrites and reads all count as a touch.

use std::fmt::Debug;
use std::hash::Hash;

use super::{EvictionPolicy, OrderList, PolicyKind};

// == LRU Policy ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys are stored in an [`OrderList`] where:
/// - Front = Least recently used
/// - Back = Most recently used
#[derive(Debug)]
pub struct LruPolicy<K> {
    /// Order of keys by access time
    order: OrderList<K>,
}

impl<K> LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: OrderList::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to back).
    pub fn touch(&mut self, key: &K) {
        self.order.push_back(key);
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.front()
    }
}

impl<K> Default for LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn on_insert(&mut self, key: &K) {
        self.touch(key);
    }

    fn on_update(&mut self, key: &K) {
        self.touch(key);
    }

    fn on_read(&mut self, key: &K) {
        self.touch(key);
    }

    // == Evict Oldest ==
    fn select_victim(&mut self) -> Option<K> {
        self.order.pop_front()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn keys(&self) -> Vec<&K> {
        self.order.iter().collect()
    }
}
