//! Policy Cache - A bounded in-memory cache with pluggable eviction
//!
//! Provides a key-value cache whose eviction is driven by one of several
//! interchangeable policies (FIFO, LIFO, LRU, MRU, LFU or none), plus a
//! small HTTP front end that serves a shared instance.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Capacity, PolicyCache, PolicyKind};
pub use config::Config;
pub use error::CacheError;
