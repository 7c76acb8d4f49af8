//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check every policy against a naive list-based model and
//! against the structural guarantees of the cache.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::cache::{EvictionLog, PolicyCache, PolicyKind};

// == Reference Model ==
/// Straightforward "remove then append" rendition of each policy.
#[derive(Debug)]
struct Model {
    kind: PolicyKind,
    capacity: Option<usize>,
    data: HashMap<u8, u16>,
    /// Oldest first
    order: Vec<u8>,
    freq: HashMap<u8, u64>,
}

impl Model {
    fn new(kind: PolicyKind, capacity: Option<usize>) -> Self {
        Self {
            kind,
            capacity,
            data: HashMap::new(),
            order: Vec::new(),
            freq: HashMap::new(),
        }
    }

    fn move_to_end(&mut self, key: u8) {
        self.order.retain(|k| *k != key);
        self.order.push(key);
    }

    fn put(&mut self, key: u8, value: u16) -> Option<u8> {
        if self.data.contains_key(&key) {
            self.data.insert(key, value);
            match self.kind {
                PolicyKind::Unbounded | PolicyKind::Fifo => {}
                PolicyKind::Lifo | PolicyKind::Lru | PolicyKind::Mru => self.move_to_end(key),
                PolicyKind::Lfu => {
                    *self.freq.entry(key).or_default() += 1;
                    self.move_to_end(key);
                }
            }
            return None;
        }

        let mut evicted = None;
        if self.capacity.is_some_and(|cap| self.data.len() >= cap) {
            let victim = match self.kind {
                PolicyKind::Unbounded => unreachable!("unbounded model has no capacity"),
                PolicyKind::Fifo | PolicyKind::Lru => self.order[0],
                PolicyKind::Lifo | PolicyKind::Mru => self.order[self.order.len() - 1],
                PolicyKind::Lfu => {
                    let min = self.freq.values().copied().min().unwrap();
                    *self.order.iter().find(|k| self.freq[*k] == min).unwrap()
                }
            };
            self.data.remove(&victim);
            self.freq.remove(&victim);
            self.order.retain(|k| *k != victim);
            evicted = Some(victim);
        }

        self.data.insert(key, value);
        self.order.push(key);
        self.freq.insert(key, 1);
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        let value = *self.data.get(&key)?;
        match self.kind {
            PolicyKind::Lru | PolicyKind::Mru => self.move_to_end(key),
            PolicyKind::Lfu => {
                *self.freq.entry(key).or_default() += 1;
                self.move_to_end(key);
            }
            _ => {}
        }
        Some(value)
    }
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u16 },
    PutAbsent { key: Option<u8>, value: Option<u16> },
    Get { key: u8 },
}

/// Small key space so that hits, overwrites and evictions all happen.
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (0u8..8, any::<u16>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        1 => (proptest::option::of(0u8..8), proptest::option::of(any::<u16>()))
            .prop_filter("at least one operand absent", |(k, v)| k.is_none() || v.is_none())
            .prop_map(|(key, value)| CacheOp::PutAbsent { key, value }),
        3 => (0u8..8).prop_map(|key| CacheOp::Get { key }),
    ]
}

fn bounded_kind_strategy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(vec![
        PolicyKind::Fifo,
        PolicyKind::Lifo,
        PolicyKind::Lru,
        PolicyKind::Mru,
        PolicyKind::Lfu,
    ])
}

fn logged_cache(kind: PolicyKind, capacity: usize) -> (PolicyCache<u8, u16>, EvictionLog<u8>) {
    let log = EvictionLog::unbounded();
    let cache = PolicyCache::bounded(kind, capacity)
        .unwrap()
        .with_listener(log.clone());
    (cache, log)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every policy evicts exactly the key the reference model evicts, and
    // reads return what the model returns.
    #[test]
    fn prop_matches_reference_model(
        kind in bounded_kind_strategy(),
        capacity in 1usize..5,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, log) = logged_cache(kind, capacity);
        let mut model = Model::new(kind, Some(capacity));

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key, value);
                    let expected = model.put(key, value);
                    prop_assert_eq!(log.drain(), expected.into_iter().collect::<Vec<_>>());
                }
                CacheOp::PutAbsent { key, value } => {
                    cache.put_opt(key, value);
                    prop_assert!(log.is_empty());
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
            }
        }

        let contents: HashMap<u8, u16> = cache
            .entries()
            .into_iter()
            .map(|(k, v)| (*k, *v))
            .collect();
        prop_assert_eq!(contents, model.data);
    }

    // The tracker and the store hold the same key set after every operation,
    // and the store never exceeds its capacity.
    #[test]
    fn prop_tracker_matches_store(
        kind in bounded_kind_strategy(),
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let (mut cache, _) = logged_cache(kind, capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::PutAbsent { key, value } => cache.put_opt(key, value),
                CacheOp::Get { key } => {
                    cache.get(&key);
                }
            }
            prop_assert!(cache.tracker_matches_store(), "tracker drifted from store: {:?}", cache);
            prop_assert!(cache.len() <= capacity);
        }
    }

    // Statistics reflect the operations that actually happened.
    #[test]
    fn prop_statistics_accuracy(
        kind in bounded_kind_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let (mut cache, log) = logged_cache(kind, 3);
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::PutAbsent { key, value } => cache.put_opt(key, value),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.evictions, log.len() as u64);
        prop_assert_eq!(stats.total_entries, cache.len());
        prop_assert_eq!(stats.inserts - stats.evictions, cache.len() as u64);
    }

    // Absent operands leave the cache exactly as it was.
    #[test]
    fn prop_absent_operands_are_noops(
        kind in bounded_kind_strategy(),
        setup in prop::collection::vec((0u8..8, any::<u16>()), 0..10),
        key in proptest::option::of(0u8..8),
        value in proptest::option::of(any::<u16>())
    ) {
        prop_assume!(key.is_none() || value.is_none());
        let (mut cache, log) = logged_cache(kind, 4);
        for (k, v) in setup {
            cache.put(k, v);
        }
        log.drain();

        let entries_before: Vec<(u8, u16)> = cache
            .entries()
            .into_iter()
            .map(|(k, v)| (*k, *v))
            .collect();
        let stats_before = cache.stats();

        cache.put_opt(key, value);

        let entries_after: Vec<(u8, u16)> = cache
            .entries()
            .into_iter()
            .map(|(k, v)| (*k, *v))
            .collect();
        prop_assert_eq!(entries_after, entries_before);
        prop_assert_eq!(cache.stats(), stats_before);
        prop_assert!(log.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // FIFO with no reads keeps exactly the last `capacity` distinct keys and
    // evicts k1 first.
    #[test]
    fn prop_fifo_survivors(
        keys in prop::collection::hash_set(any::<u16>(), 2..40),
        capacity in 1usize..10
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        prop_assume!(keys.len() > capacity);

        let log: EvictionLog<u16> = EvictionLog::unbounded();
        let mut cache = PolicyCache::bounded(PolicyKind::Fifo, capacity)
            .unwrap()
            .with_listener(log.clone());
        for key in &keys {
            cache.put(*key, ());
        }

        let survivors: HashSet<u16> = cache.entries().into_iter().map(|(k, _)| *k).collect();
        let expected: HashSet<u16> = keys[keys.len() - capacity..].iter().copied().collect();
        prop_assert_eq!(survivors, expected);
        prop_assert_eq!(log.keys().first().copied(), Some(keys[0]));
    }

    // LRU: reading the oldest key shifts eviction to the second oldest.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::hash_set(any::<u16>(), 3..10),
        new_key in any::<u16>()
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        prop_assume!(!keys.contains(&new_key));

        let log: EvictionLog<u16> = EvictionLog::unbounded();
        let mut cache = PolicyCache::bounded(PolicyKind::Lru, keys.len())
            .unwrap()
            .with_listener(log.clone());
        for key in &keys {
            cache.put(*key, ());
        }

        cache.get(&keys[0]);
        cache.put(new_key, ());

        prop_assert_eq!(log.keys(), vec![keys[1]]);
        prop_assert!(cache.contains(&keys[0]));
        prop_assert!(cache.contains(&new_key));
    }

    // MRU never evicts the key being inserted; it evicts whatever was most
    // recent just before.
    #[test]
    fn prop_mru_spares_incoming_key(
        keys in prop::collection::hash_set(any::<u16>(), 1..10),
        read_index in any::<prop::sample::Index>(),
        new_key in any::<u16>()
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        prop_assume!(!keys.contains(&new_key));

        let log: EvictionLog<u16> = EvictionLog::unbounded();
        let mut cache = PolicyCache::bounded(PolicyKind::Mru, keys.len())
            .unwrap()
            .with_listener(log.clone());
        for key in &keys {
            cache.put(*key, ());
        }
        let read = keys[read_index.index(keys.len())];
        cache.get(&read);
        cache.put(new_key, ());

        prop_assert_eq!(log.keys(), vec![read]);
        prop_assert!(cache.contains(&new_key));
    }

    // LFU never evicts a key while another key has a strictly lower count.
    #[test]
    fn prop_lfu_spares_frequent_key(
        keys in prop::collection::hash_set(any::<u16>(), 2..8),
        reads in 1usize..5,
        extra in prop::collection::vec(any::<u16>(), 1..20)
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        let hot = keys[0];
        prop_assume!(!extra.contains(&hot));

        let mut cache = PolicyCache::bounded(PolicyKind::Lfu, keys.len()).unwrap();
        for key in &keys {
            cache.put(*key, ());
        }
        for _ in 0..reads + extra.len() {
            cache.get(&hot);
        }
        for key in extra {
            cache.put(key, ());
            prop_assert!(cache.contains(&hot), "hot key evicted");
        }
    }
}

// == Unbounded ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_unbounded_keeps_everything(
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let log: EvictionLog<u8> = EvictionLog::unbounded();
        let mut cache = PolicyCache::unbounded().with_listener(log.clone());
        let mut model = Model::new(PolicyKind::Unbounded, None);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key, value);
                    model.put(key, value);
                }
                CacheOp::PutAbsent { key, value } => cache.put_opt(key, value),
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
            }
            prop_assert!(cache.tracker_matches_store());
        }

        prop_assert!(log.is_empty());
        prop_assert_eq!(cache.len(), model.data.len());
    }
}
