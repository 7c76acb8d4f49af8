//! Eviction Policies
//!
//! Each policy is a small tracker implementing [`EvictionPolicy`]. The cache
//! owns the values; trackers only see keys and decide who goes next.
//!
//! | Policy    | Victim                                         | Read moves key |
//! |-----------|------------------------------------------------|----------------|
//! | Unbounded | never                                          | no             |
//! | FIFO      | earliest inserted                              | no             |
//! | LIFO      | last `put` (insert or update)                  | no             |
//! | LRU       | least recently touched                         | yes            |
//! | MRU       | most recently touched                          | yes            |
//! | LFU       | lowest frequency, least recently touched tie   | yes            |

mod fifo;
mod lfu;
mod lifo;
mod lru;
mod mru;
mod order;
mod unbounded;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lifo::LifoPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use order::OrderList;
pub use unbounded::UnboundedPolicy;

// == Eviction Policy Trait ==
/// Key-ordering bookkeeping behind a [`PolicyCache`](crate::cache::PolicyCache).
///
/// The cache calls exactly one hook per store mutation, so the tracked key
/// set always equals the store's key set between public operations.
pub trait EvictionPolicy<K>: fmt::Debug + Send + Sync {
    /// Which behaviour this tracker implements.
    fn kind(&self) -> PolicyKind;

    /// A key not previously tracked was inserted.
    fn on_insert(&mut self, key: &K);

    /// An existing key had its value overwritten.
    fn on_update(&mut self, key: &K);

    /// An existing key was read.
    fn on_read(&mut self, key: &K);

    /// Picks the next victim and stops tracking it.
    ///
    /// Called before the incoming key is inserted, so the incoming key is
    /// never a candidate. Returns `None` when nothing may be evicted.
    fn select_victim(&mut self) -> Option<K>;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tracked keys, next victim first for evicting policies.
    fn keys(&self) -> Vec<&K>;
}

// == Policy Kind ==
/// Runtime selector for the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Unbounded,
    Fifo,
    Lifo,
    Lru,
    Mru,
    Lfu,
}

impl PolicyKind {
    /// Every built-in policy, in documentation order.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Unbounded,
        PolicyKind::Fifo,
        PolicyKind::Lifo,
        PolicyKind::Lru,
        PolicyKind::Mru,
        PolicyKind::Lfu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Unbounded => "unbounded",
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lifo => "lifo",
            PolicyKind::Lru => "lru",
            PolicyKind::Mru => "mru",
            PolicyKind::Lfu => "lfu",
        }
    }

    /// Whether this policy ever evicts.
    pub fn is_bounded(self) -> bool {
        self != PolicyKind::Unbounded
    }

    /// Builds an empty tracker for this policy.
    pub fn build<K>(self) -> Box<dyn EvictionPolicy<K>>
    where
        K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            PolicyKind::Unbounded => Box::new(UnboundedPolicy::new()),
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
            PolicyKind::Lifo => Box::new(LifoPolicy::new()),
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Mru => Box::new(MruPolicy::new()),
            PolicyKind::Lfu => Box::new(LfuPolicy::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    /// Parses a policy name, case-insensitively. `basic` is accepted as an
    /// alias for `unbounded`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" | "basic" => Ok(PolicyKind::Unbounded),
            "fifo" => Ok(PolicyKind::Fifo),
            "lifo" => Ok(PolicyKind::Lifo),
            "lru" => Ok(PolicyKind::Lru),
            "mru" => Ok(PolicyKind::Mru),
            "lfu" => Ok(PolicyKind::Lfu),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown eviction policy '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("LRU".parse::<PolicyKind>().unwrap(), PolicyKind::Lru);
        assert_eq!(" lfu ".parse::<PolicyKind>().unwrap(), PolicyKind::Lfu);
        assert_eq!(
            "basic".parse::<PolicyKind>().unwrap(),
            PolicyKind::Unbounded
        );
        assert!(matches!(
            "random".parse::<PolicyKind>(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_policy_kind_display_roundtrips() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_policy_kind_serde_lowercase() {
        let json = serde_json::to_string(&PolicyKind::Mru).unwrap();
        assert_eq!(json, "\"mru\"");
        let kind: PolicyKind = serde_json::from_str("\"fifo\"").unwrap();
        assert_eq!(kind, PolicyKind::Fifo);
    }

    #[test]
    fn test_build_reports_kind() {
        for kind in PolicyKind::ALL {
            let policy = kind.build::<u32>();
            assert_eq!(policy.kind(), kind);
            assert!(policy.is_empty());
        }
    }
}
