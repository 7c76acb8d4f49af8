//! Store Module
//!
//! The plain key → value mapping owned by a cache. It has no notion of
//! order; the active policy tracks that separately.

use std::collections::HashMap;
use std::hash::Hash;

// == Store ==
/// Key-value storage shared by every policy.
#[derive(Debug)]
pub struct Store<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Inserts or overwrites, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Overwrites the value of an existing key in place.
    ///
    /// Returns the value back if the key is not stored.
    pub fn replace(&mut self, key: &K, value: V) -> Result<V, V> {
        match self.entries.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for Store<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
