//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Longest key accepted over HTTP, in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// Either field may be `null` or missing; such a request is accepted and
/// ignored, the same way the cache ignores absent operands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetRequest {
    /// The cache key
    #[serde(default)]
    pub key: Option<String>,
    /// The value to store
    #[serde(default)]
    pub value: Option<String>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let key = self.key.as_deref()?;
        if key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
