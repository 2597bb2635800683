use serde_json::{Map, Value};

use crate::errors::ErrorCode;

/// JSON body posted by the shortcut.
///
/// Kept loosely typed on purpose: a missing or mistyped `url` is a user-facing
/// error code, not an extractor rejection.
#[derive(Debug, Clone)]
pub struct ResolveBody {
    fields: Map<String, Value>,
}

impl ResolveBody {
    /// Parses raw request bytes. Blank, non-JSON, non-object and `{}` bodies are all empty requests.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ErrorCode> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(fields)) if !fields.is_empty() => Ok(Self { fields }),
            _ => Err(ErrorCode::EmptyBody),
        }
    }

    /// The `url` field when it holds a non-empty string.
    pub fn url(&self) -> Option<&str> {
        self.string_field("url")
    }

    /// Declared shortcut version.
    pub fn ver(&self) -> Option<&str> {
        self.string_field("ver")
    }

    /// Integrity key sent by the shortcut.
    pub fn key(&self) -> Option<&str> {
        self.string_field("key")
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    fn string_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Best-effort JSON rendering of a request body for the error log.
pub fn body_for_log(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
