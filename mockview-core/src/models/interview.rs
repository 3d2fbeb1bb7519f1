use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::mock_response::{blob_text, MockResponse};
use super::{lenient_text, new_id, timestamp_now};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MockInterview {
    pub id: String,
    pub mock_id: String,
    pub json_mock_resp: String,
    pub job_position: Option<String>,
    pub job_desc: Option<String>,
    pub job_experience: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
}

/// Single-record view with the blob parsed back into JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetail {
    pub id: String,
    pub mock_id: String,
    pub json_mock_resp: Value,
    pub job_position: Option<String>,
    pub job_desc: Option<String>,
    pub job_experience: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
}

impl MockInterview {
    pub fn parse_mock_resp(&self) -> MockResponse {
        MockResponse::parse(&self.json_mock_resp)
    }

    pub fn into_detail(self, resp: MockResponse) -> InterviewDetail {
        InterviewDetail {
            id: self.id,
            mock_id: self.mock_id,
            json_mock_resp: resp.into_value(),
            job_position: self.job_position,
            job_desc: self.job_desc,
            job_experience: self.job_experience,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// Body of `POST /api/interviews`. A client-supplied `mockId` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMockInterview {
    #[serde(default)]
    pub json_mock_resp: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_position: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_experience: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
}

/// Row about to be inserted: identifiers and timestamp assigned, blob
/// flattened to text. `json_mock_resp` stays optional so a missing blob
/// reaches the NOT NULL constraint.
#[derive(Debug, Clone)]
pub struct InterviewRow {
    pub id: String,
    pub mock_id: String,
    pub json_mock_resp: Option<String>,
    pub job_position: Option<String>,
    pub job_desc: Option<String>,
    pub job_experience: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
}

impl NewMockInterview {
    pub fn into_row(self) -> InterviewRow {
        InterviewRow {
            id: new_id(),
            mock_id: new_id(),
            json_mock_resp: self.json_mock_resp.and_then(blob_text),
            job_position: self.job_position,
            job_desc: self.job_desc,
            job_experience: self.job_experience,
            created_by: self.created_by,
            created_at: timestamp_now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MockInterview {
        MockInterview {
            id: "1".into(),
            mock_id: "m-1".into(),
            json_mock_resp: r#"[{"q":"Q1"}]"#.into(),
            job_position: Some("Engineer".into()),
            job_desc: Some("Backend".into()),
            job_experience: Some("3".into()),
            created_by: Some("a@x.com".into()),
            created_at: "2024-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn serializes_camel_case() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["mockId"], "m-1");
        assert_eq!(v["jsonMockResp"], r#"[{"q":"Q1"}]"#);
        assert_eq!(v["createdBy"], "a@x.com");
    }

    #[test]
    fn detail_replaces_blob_with_parsed_value() {
        let interview = sample();
        let resp = interview.parse_mock_resp();
        let detail = interview.into_detail(resp);
        assert_eq!(detail.json_mock_resp, json!([{"q": "Q1"}]));
        assert_eq!(detail.job_position.as_deref(), Some("Engineer"));
    }

    #[test]
    fn request_coerces_numbers_and_ignores_mock_id() {
        let req: NewMockInterview = serde_json::from_value(json!({
            "jobPosition": "Engineer",
            "jobExperience": 3,
            "jsonMockResp": [{"q": "Q1"}],
            "mockId": "client-chosen"
        }))
        .unwrap();
        assert_eq!(req.job_experience.as_deref(), Some("3"));
        assert!(req.created_by.is_none());

        let row = req.into_row();
        assert_ne!(row.mock_id, "client-chosen");
        assert_ne!(row.id, row.mock_id);
        assert_eq!(row.json_mock_resp.as_deref(), Some(r#"[{"q":"Q1"}]"#));
    }
}
