//! Order List Module
//!
//! Arena-backed doubly linked list of keys with a key → slot index.
//!
//! Keys are kept in order where:
//! - Front = oldest (first appended, or least recently repositioned)
//! - Back = newest
//!
//! Nodes live in a `Vec` of slots and link to each other by slot index, so
//! append, reposition, removal and popping at either end are all O(1).
//! Freed slots are recycled through a free list.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Order List ==
/// Ordered set of keys with O(1) reposition.
#[derive(Debug)]
pub struct OrderList<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> Default for OrderList<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }
}

impl<K> OrderList<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Back ==
    /// Appends `key` as the newest element.
    ///
    /// If the key is already present it is moved to the back instead, so the
    /// list never holds duplicates.
    pub fn push_back(&mut self, key: &K) {
        if self.move_to_back(key) {
            return;
        }

        let node = Node {
            key: key.clone(),
            prev: self.tail,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach_back(slot);
        self.index.insert(key.clone(), slot);
    }

    // == Move To Back ==
    /// Repositions an existing key as the newest element.
    ///
    /// Returns `false` if the key is not tracked.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        let Some(&slot) = self.index.get(key) else {
            return false;
        };
        if self.tail != Some(slot) {
            self.detach(slot);
            self.attach_back(slot);
        }
        true
    }

    // == Remove ==
    /// Removes a key from the list. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(slot) => {
                self.release(slot);
                true
            }
            None => false,
        }
    }

    // == Pop Front ==
    /// Removes and returns the oldest key.
    pub fn pop_front(&mut self) -> Option<K> {
        let slot = self.head?;
        let key = self.release(slot)?;
        self.index.remove(&key);
        Some(key)
    }

    // == Pop Back ==
    /// Removes and returns the newest key.
    pub fn pop_back(&mut self) -> Option<K> {
        let slot = self.tail?;
        let key = self.release(slot)?;
        self.index.remove(&key);
        Some(key)
    }

    /// Returns the oldest key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|slot| self.key_at(slot))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.slots.get(cursor?)?.as_ref()?;
            cursor = node.next;
            Some(&node.key)
        })
    }

    // == Internal Linking ==
    fn key_at(&self, slot: usize) -> Option<&K> {
        self.slots.get(slot)?.as_ref().map(|node| &node.key)
    }

    fn detach(&mut self, slot: usize) {
        let (prev, next) = match self.slots[slot].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn attach_back(&mut self, slot: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slots[slot].as_mut() {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => {
                if let Some(node) = self.slots[t].as_mut() {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    /// Unlinks a slot, frees it and hands back its key. The index is left to
    /// the caller.
    fn release(&mut self, slot: usize) -> Option<K> {
        self.detach(slot);
        let node = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        Some(node.key)
    }
}
