//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::binding::Timeout;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for PUT /set and POST /add
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: absent = default TTL, `null` = never expires, `0` = do not cache
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// TTL in seconds; outer `None` when the field is absent
    #[serde(default, deserialize_with = "present")]
    pub ttl: Option<Option<u64>>,
}

/// Distinguishes an explicit `null` from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

impl SetRequest {
    /// Maps the wire `ttl` onto the host timeout policy.
    pub fn timeout(&self) -> Timeout {
        self.ttl.map_or(Timeout::Default, Timeout::from)
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for POST /get_many and POST /delete_many
#[derive(Debug, Clone, Deserialize)]
pub struct KeysRequest {
    pub keys: Vec<String>,
}

impl KeysRequest {
    pub fn validate(&self) -> Option<String> {
        self.keys.iter().find_map(|key| validate_key(key))
    }
}

/// Shared key rules for every endpoint taking keys.
pub fn validate_key(key: &str) -> Option<String> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_without_ttl_uses_default() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, Value::String("hello".into()));
        assert!(req.ttl.is_none());
        assert_eq!(req.timeout(), Timeout::Default);
    }

    #[test]
    fn test_set_request_null_ttl_never_expires() {
        let json = r#"{"key": "test", "value": 1, "ttl": null}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(None));
        assert_eq!(req.timeout(), Timeout::Never);
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": {"a": [1, 2]}, "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.timeout(), Timeout::Seconds(60));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: Value::Null,
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_key() {
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH)).is_none());
    }

    #[test]
    fn test_keys_request_validation() {
        let req: KeysRequest = serde_json::from_str(r#"{"keys": ["a", ""]}"#).unwrap();
        assert!(req.validate().is_some());
    }
}
