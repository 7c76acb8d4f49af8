//! Unbounded Policy
//!
//! Never evicts. Keys are tracked in insertion order only so the cache can
//! report a stable snapshot.

use std::fmt::Debug;
use std::hash::Hash;

use super::{EvictionPolicy, OrderList, PolicyKind};

/// Tracker for a cache without a size limit.
#[derive(Debug)]
pub struct UnboundedPolicy<K> {
    order: OrderList<K>,
}

impl<K> UnboundedPolicy<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            order: OrderList::new(),
        }
    }
}

impl<K> Default for UnboundedPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for UnboundedPolicy<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Unbounded
    }

    fn on_insert(&mut self, key: &K) {
        self.order.push_back(key);
    }

    fn on_update(&mut self, _key: &K) {}

    fn on_read(&mut self, _key: &K) {}

    fn select_victim(&mut self) -> Option<K> {
        None
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn keys(&self) -> Vec<&K> {
        self.order.iter().collect()
    }
}
