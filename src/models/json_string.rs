//! Serde adapters for fields the panel sometimes sends as JSON-encoded strings.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Accept either a nested value or a string containing its JSON encoding.
/// An empty string reads as an empty object.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let value = match value {
        Value::String(encoded) if encoded.trim().is_empty() => Value::Object(Map::new()),
        Value::String(encoded) => serde_json::from_str(&encoded)
            .map_err(|e| D::Error::custom(format!("invalid JSON-encoded field: {}", e)))?,
        other => other,
    };
    serde_json::from_value(value).map_err(D::Error::custom)
}

/// Write the value as a JSON-encoded string.
pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let encoded = serde_json::to_string(value).map_err(S::Error::custom)?;
    serializer.serialize_str(&encoded)
}

/// Encode a value as a JSON string for request payloads.
pub fn encode<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
