//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{Capacity, PolicyKind, DEFAULT_MAX_ENTRIES};
use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Eviction policy of the shared cache
    pub policy: PolicyKind,
    /// Maximum number of entries; ignored by the unbounded policy
    pub max_entries: i64,
    /// HTTP server port
    pub server_port: u16,
    /// How many evicted keys `/evictions` remembers
    pub eviction_log_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - `unbounded|basic|fifo|lifo|lru|mru|lfu` (default: lru)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 4)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `EVICTION_LOG_SIZE` - Evicted keys kept for inspection (default: 100)
    ///
    /// A variable that is set but cannot be parsed is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            policy: parse_var(&lookup, "CACHE_POLICY", defaults.policy)?,
            max_entries: parse_var(&lookup, "MAX_ENTRIES", defaults.max_entries)?,
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            eviction_log_size: parse_var(
                &lookup,
                "EVICTION_LOG_SIZE",
                defaults.eviction_log_size,
            )?,
        })
    }

    /// Resolves the configured capacity for the configured policy.
    ///
    /// Zero or negative `max_entries` is rejected for every bounded policy.
    pub fn capacity(&self) -> Result<Capacity> {
        if self.policy.is_bounded() {
            Capacity::try_from(self.max_entries)
        } else {
            Ok(Capacity::Unbounded)
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!("{} has an invalid value '{}'", name, raw))
        }),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Lru,
            max_entries: DEFAULT_MAX_ENTRIES as i64,
            server_port: 3000,
            eviction_log_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.policy, PolicyKind::Lru);
        assert_eq!(config.max_entries, 4);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.eviction_log_size, 100);
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_from_lookup_values() {
        let config = Config::from_lookup(lookup(&[
            ("CACHE_POLICY", "LFU"),
            ("MAX_ENTRIES", "16"),
            ("SERVER_PORT", "8080"),
            ("EVICTION_LOG_SIZE", "5"),
        ]))
        .unwrap();

        assert_eq!(config.policy, PolicyKind::Lfu);
        assert_eq!(config.max_entries, 16);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.eviction_log_size, 5);
        assert_eq!(config.capacity().unwrap().limit(), Some(16));
    }

    #[test]
    fn test_config_rejects_garbage() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "eighty")]));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));

        let result = Config::from_lookup(lookup(&[("CACHE_POLICY", "random")]));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_non_positive_capacity() {
        let config = Config::from_lookup(lookup(&[("MAX_ENTRIES", "-1")])).unwrap();
        assert!(matches!(
            config.capacity(),
            Err(CacheError::InvalidConfig(_))
        ));

        let config = Config::from_lookup(lookup(&[("MAX_ENTRIES", "0")])).unwrap();
        assert!(config.capacity().is_err());
    }

    #[test]
    fn test_config_unbounded_ignores_capacity() {
        let config = Config::from_lookup(lookup(&[
            ("CACHE_POLICY", "basic"),
            ("MAX_ENTRIES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.capacity().unwrap(), Capacity::Unbounded);
    }
}
