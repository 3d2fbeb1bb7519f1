use serde_json::Value;

/// Outcome of reading back a stored `json_mock_resp` blob.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Parsed(Value),
    /// Blank text; nothing to parse.
    Empty,
    /// Text that is not valid JSON, with the parser's message.
    Corrupt(String),
}

impl MockResponse {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(raw) {
            Ok(v) => Self::Parsed(v),
            Err(e) => Self::Corrupt(e.to_string()),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }

    /// Value sent to clients; empty and corrupt blobs render as `{}`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Parsed(v) => v,
            Self::Empty | Self::Corrupt(_) => Value::Object(Default::default()),
        }
    }
}

/// Text form of an incoming blob. Strings are kept verbatim, other JSON
/// values are stored as their compact serialization.
pub fn blob_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
