pub mod answer;
pub mod interview;
pub mod mock_response;

pub use answer::{AnswerRow, NewUserAnswer, UserAnswer};
pub use interview::{InterviewDetail, InterviewRow, MockInterview, NewMockInterview};
pub use mock_response::MockResponse;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fresh record identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creation timestamp as stored: RFC 3339, UTC, millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accept a JSON string, number or bool as free text; `null` means absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

pub(crate) fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_has_millis_and_zulu() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'), "{}", ts);
        let fraction = ts.split('.').nth(1).unwrap();
        assert_eq!(fraction.len(), 4, "expected .mmmZ, got {}", ts);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn text_coercion() {
        assert_eq!(value_to_text(json!("3")), Some("3".to_string()));
        assert_eq!(value_to_text(json!(3)), Some("3".to_string()));
        assert_eq!(value_to_text(json!(true)), Some("true".to_string()));
        assert_eq!(value_to_text(json!(null)), None);
        assert_eq!(value_to_text(json!([1])), Some("[1]".to_string()));
    }
}
