//! FIFO Policy
//!
//! Evicts the earliest inserted surviving key. Overwrites and reads leave
//! the insertion order alone.

use std::fmt::Debug;
use std::hash::Hash;

use super::{EvictionPolicy, OrderList, PolicyKind};

/// First-In-First-Out tracker.
#[derive(Debug)]
pub struct FifoPolicy<K> {
    /// Front = first inserted
    queue: OrderList<K>,
}

impl<K> FifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            queue: OrderList::new(),
        }
    }
}

impl<K> Default for FifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for FifoPolicy<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn on_insert(&mut self, key: &K) {
        self.queue.push_back(key);
    }

    // Position is fixed at first insertion.
    fn on_update(&mut self, _key: &K) {}

    fn on_read(&mut self, _key: &K) {}

    fn select_victim(&mut self) -> Option<K> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn keys(&self) -> Vec<&K> {
        self.queue.iter().collect()
    }
}
