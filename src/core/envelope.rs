//! Versioned envelope written to storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version of the stored draft format.
///
/// Bumping this invalidates every previously stored draft.
pub const DATA_VERSION: &str = "1.0.0";

/// The unit actually written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedEnvelope<T> {
    pub version: String,
    pub data: T,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl<T> VersionedEnvelope<T> {
    /// Wrap data with the current version.
    pub fn new(data: T, timestamp: u64) -> Self {
        VersionedEnvelope {
            version: DATA_VERSION.to_string(),
            data,
            timestamp,
        }
    }

    pub fn is_current(&self) -> bool {
        self.version == DATA_VERSION
    }
}

impl<T: Serialize> VersionedEnvelope<T> {
    /// Serialize with empty values stripped.
    pub fn to_compact_json(&self) -> serde_json::Result<String> {
        let mut value = serde_json::to_value(self)?;
        strip_empty(&mut value);
        serde_json::to_string(&value)
    }
}

/// True for values dropped from the stored payload.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Remove empty strings, empty lists and nulls from every object, recursively.
///
/// Array elements are kept in place so list positions survive; objects
/// nested inside arrays are still stripped.
pub fn strip_empty(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !is_empty_value(v));
            for v in map.values_mut() {
                strip_empty(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                strip_empty(item);
            }
        }
        _ => {}
    }
}
