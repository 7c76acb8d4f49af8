//! Capacity Module
//!
//! The size bound of a cache, fixed at construction.

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::{CacheError, Result};

// == Capacity ==
/// Maximum number of entries a cache may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacity {
    /// At most this many entries
    Bounded(NonZeroUsize),
    /// No limit, eviction disabled
    Unbounded,
}

impl Capacity {
    /// Creates a bounded capacity, rejecting zero.
    pub fn bounded(max_entries: usize) -> Result<Self> {
        NonZeroUsize::new(max_entries)
            .map(Capacity::Bounded)
            .ok_or_else(|| {
                CacheError::InvalidConfig("capacity must be a positive integer".to_string())
            })
    }

    /// Returns the limit, or `None` when unbounded.
    pub fn limit(self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(n.get()),
            Capacity::Unbounded => None,
        }
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, Capacity::Bounded(_))
    }

    /// Whether a store holding `len` entries must evict before taking a new
    /// key.
    pub fn is_full(self, len: usize) -> bool {
        match self {
            Capacity::Bounded(n) => len >= n.get(),
            Capacity::Unbounded => false,
        }
    }
}

impl TryFrom<i64> for Capacity {
    type Error = CacheError;

    /// Converts a signed configuration value; zero and negatives are
    /// rejected.
    fn try_from(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(CacheError::InvalidConfig(format!(
                "capacity must be a positive integer, got {}",
                value
            )));
        }
        let max_entries = usize::try_from(value).map_err(|_| {
            CacheError::InvalidConfig(format!("capacity {} does not fit in usize", value))
        })?;
        Capacity::bounded(max_entries)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(n) => write!(f, "{}", n),
            Capacity::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Serialized as the limit, or `null` when unbounded.
impl Serialize for Capacity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.limit().serialize(serializer)
    }
}
