//! MRU Policy
//!
//! Evicts the most recently touched key. Eviction runs before the incoming
//! key is tracked, so the victim is whatever was most recent immediately
//! before the insert, never the key being written.

use std::fmt::Debug;
use std::hash::Hash;

use super::{EvictionPolicy, OrderList, PolicyKind};

/// Most Recently Used tracker.
#[derive(Debug)]
pub struct MruPolicy<K> {
    /// Back = most recently used
    order: OrderList<K>,
}

impl<K> MruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            order: OrderList::new(),
        }
    }
}

impl<K> Default for MruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for MruPolicy<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Mru
    }

    fn on_insert(&mut self, key: &K) {
        self.order.push_back(key);
    }

    fn on_update(&mut self, key: &K) {
        self.order.move_to_back(key);
    }

    fn on_read(&mut self, key: &K) {
        self.order.move_to_back(key);
    }

    fn select_victim(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn keys(&self) -> Vec<&K> {
        let mut keys: Vec<&K> = self.order.iter().collect();
        keys.reverse();
        keys
    }
}
