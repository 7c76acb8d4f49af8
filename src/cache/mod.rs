//! Cache Module
//!
//! Provides a bounded in-memory cache with pluggable eviction policies.

mod capacity;
mod notify;
pub mod policy;
mod policy_cache;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use capacity::Capacity;
pub use notify::{EvictionListener, EvictionLog, TracingListener};
pub use policy::{EvictionPolicy, PolicyKind};
pub use policy_cache::PolicyCache;
pub use stats::CacheStats;
pub use store::Store;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_MAX_ENTRIES: usize = 4;
