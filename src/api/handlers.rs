//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Every handler
//! holds the cache lock for exactly one cache operation.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};

use crate::cache::{EvictionLog, PolicyCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    EntriesResponse, EvictionsResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// String-keyed cache served over HTTP.
pub type SharedCache = Arc<RwLock<PolicyCache<String, String>>>;

/// Application state shared across all handlers.
///
/// Contains the cache wrapped in Arc<RwLock<>> and the log its evictions
/// are reported to.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: SharedCache,
    /// Most recently evicted keys
    pub evictions: EvictionLog<String>,
}

impl AppState {
    /// Wraps a cache, routing its evictions to the log and to tracing.
    pub fn new(cache: PolicyCache<String, String>, eviction_log_size: usize) -> Self {
        let evictions = EvictionLog::with_limit(eviction_log_size);
        let sink = evictions.clone();
        let cache = cache.with_listener(move |key: &String| {
            info!(evicted = %key, "DISCARD");
            sink.record(key.clone());
        });

        Self {
            cache: Arc::new(RwLock::new(cache)),
            evictions,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails on a non-positive capacity for a bounded policy.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = PolicyCache::new(config.policy, config.capacity()?)?;
        Ok(Self::new(cache, config.eviction_log_size))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair. A request without a key or without a value is
/// accepted and changes nothing.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let stored = req.key.is_some() && req.value.is_some();
    state.cache.write().await.put_opt(req.key.clone(), req.value);

    if stored {
        Ok(Json(SetResponse::stored(req.key.unwrap_or_default())))
    } else {
        debug!(key = ?req.key, "ignoring set without key or value");
        Ok(Json(SetResponse::ignored(req.key)))
    }
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: reads reorder the policy and update stats
    let value = state
        .cache
        .write()
        .await
        .get(&key)
        .cloned()
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /entries
///
/// Returns a snapshot of the cache in the policy's tracked order.
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    let cache = state.cache.read().await;
    Json(EntriesResponse::new(
        cache.policy_kind(),
        cache.capacity(),
        cache.entries(),
    ))
}

/// Handler for GET /evictions
pub async fn evictions_handler(State(state): State<AppState>) -> Json<EvictionsResponse> {
    Json(EvictionsResponse {
        evicted: state.evictions.keys(),
    })
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(
        cache.policy_kind(),
        cache.capacity(),
        &cache.stats(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
