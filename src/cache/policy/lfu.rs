//! LFU Policy
//!
//! Evicts the key with the lowest access frequency. When several keys share
//! that frequency, the one touched longest ago goes first.
//!
//! Keys are grouped into one [`OrderList`] per frequency. A key joins the
//! list for frequency `f` at the moment it is touched up to `f`, so each
//! list is ordered by last touch and its front is the least recently
//! touched key at that frequency:
//!
//! ```text
//!   freq 1: [d] <-> [e]          <- victim is `d`
//!   freq 3: [b] <-> [a]
//!   freq 7: [c]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use super::{EvictionPolicy, OrderList, PolicyKind};

// == LFU Policy ==
/// Least Frequently Used tracker with a recency tie-break.
#[derive(Debug)]
pub struct LfuPolicy<K> {
    /// Access count per key
    frequencies: HashMap<K, u64>,
    /// Keys per frequency, least recently touched first
    buckets: BTreeMap<u64, OrderList<K>>,
}

impl<K> LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            frequencies: HashMap::new(),
            buckets: BTreeMap::new(),
        }
    }

    /// Returns the access count recorded for `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.frequencies.get(key).copied()
    }

    // == Touch ==
    /// Bumps the frequency of a tracked key and makes it the most recent
    /// key at its new frequency.
    fn touch(&mut self, key: &K) {
        let Some(freq) = self.frequencies.get_mut(key) else {
            return;
        };
        let old = *freq;
        *freq += 1;
        let new = *freq;

        self.unlink(key, old);
        self.buckets.entry(new).or_default().push_back(key);
    }

    fn unlink(&mut self, key: &K, freq: u64) {
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.remove(key);
            if bucket.is_empty() {
                self.buckets.remove(&freq);
            }
        }
    }
}

impl<K> Default for LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn on_insert(&mut self, key: &K) {
        if self.frequencies.contains_key(key) {
            self.touch(key);
            return;
        }
        self.frequencies.insert(key.clone(), 1);
        self.buckets.entry(1).or_default().push_back(key);
    }

    fn on_update(&mut self, key: &K) {
        self.touch(key);
    }

    fn on_read(&mut self, key: &K) {
        self.touch(key);
    }

    fn select_victim(&mut self) -> Option<K> {
        let mut lowest = self.buckets.first_entry()?;
        let victim = lowest.get_mut().pop_front();
        if lowest.get().is_empty() {
            lowest.remove();
        }

        let victim = victim?;
        self.frequencies.remove(&victim);
        Some(victim)
    }

    fn len(&self) -> usize {
        self.frequencies.len()
    }

    fn keys(&self) -> Vec<&K> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.iter())
            .collect()
    }
}
