//! LIFO Policy
//!
//! Evicts the key written by the most recent `put`, whether that `put`
//! inserted it or overwrote it. Reads do not count.

use std::fmt::Debug;
use std::hash::Hash;

use super::{EvictionPolicy, OrderList, PolicyKind};

/// Last-In-First-Out tracker.
#[derive(Debug)]
pub struct LifoPolicy<K> {
    /// Back = last written
    stack: OrderList<K>,
}

impl<K> LifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            stack: OrderList::new(),
        }
    }
}

impl<K> Default for LifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for LifoPolicy<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lifo
    }

    fn on_insert(&mut self, key: &K) {
        self.stack.push_back(key);
    }

    fn on_update(&mut self, key: &K) {
        self.stack.move_to_back(key);
    }

    fn on_read(&mut self, _key: &K) {}

    fn select_victim(&mut self) -> Option<K> {
        self.stack.pop_back()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn keys(&self) -> Vec<&K> {
        let mut keys: Vec<&K> = self.stack.iter().collect();
        keys.reverse();
        keys
    }
}
