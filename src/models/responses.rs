//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, Capacity, PolicyKind};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Human readable outcome
    pub message: String,
    /// The key that was set, if one was given
    pub key: Option<String>,
    /// False when the request carried no key or no value
    pub stored: bool,
}

impl SetResponse {
    /// The pair was written to the cache
    pub fn stored(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key: Some(key),
            stored: true,
        }
    }

    /// The request was a no-op
    pub fn ignored(key: Option<String>) -> Self {
        Self {
            message: "Missing key or value, nothing stored".to_string(),
            key,
            stored: false,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub policy: PolicyKind,
    /// `null` when unbounded
    pub capacity: Capacity,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(policy: PolicyKind, capacity: Capacity, stats: &CacheStats) -> Self {
        Self {
            policy,
            capacity,
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            updates: stats.updates,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// One key-value pair in an [`EntriesResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub key: String,
    pub value: String,
}

/// Response body for the snapshot endpoint (GET /entries)
///
/// Entries are listed in the policy's tracked order, next victim first.
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub policy: PolicyKind,
    pub capacity: Capacity,
    pub entries: Vec<EntryView>,
}

impl EntriesResponse {
    pub fn new<'a>(
        policy: PolicyKind,
        capacity: Capacity,
        entries: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        Self {
            policy,
            capacity,
            entries: entries
                .into_iter()
                .map(|(key, value)| EntryView {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Response body for GET /evictions, oldest eviction first
#[derive(Debug, Clone, Serialize)]
pub struct EvictionsResponse {
    pub evicted: Vec<String>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_response_variants() {
        let resp = SetResponse::stored("my_key");
        assert!(resp.stored);
        assert!(resp.message.contains("my_key"));

        let resp = SetResponse::ignored(None);
        assert!(!resp.stored);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["key"].is_null());
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        let resp = StatsResponse::new(PolicyKind::Lfu, Capacity::bounded(8).unwrap(), &stats);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["policy"], "lfu");
        assert_eq!(json["capacity"], 8);
        assert_eq!(json["evictions"], 1);
    }

    #[test]
    fn test_entries_response_keeps_order() {
        let pairs = [
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ];
        let resp = EntriesResponse::new(
            PolicyKind::Fifo,
            Capacity::Unbounded,
            pairs.iter().map(|(k, v)| (k, v)),
        );

        assert_eq!(resp.entries[0].key, "b");
        assert_eq!(resp.entries[1].value, "1");
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["capacity"].is_null());
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
