//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};

use crate::cache::Value;

/// Request body for PUT /set
///
/// `value` is optional and tri-state: a missing field stores
/// [`Value::Undefined`], an explicit `null` stores [`Value::Null`].
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The key to store under
    pub key: String,
    /// The value to store; `None` when the field was absent
    #[serde(default, deserialize_with = "present")]
    pub value: Option<serde_json::Value>,
}

/// Maps a present field (including `null`) to `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    /// Splits the request into store key and value.
    pub fn into_entry(self) -> (Value, Value) {
        let value = self.value.map(Value::from).unwrap_or(Value::Undefined);
        (Value::Text(self.key), value)
    }
}
