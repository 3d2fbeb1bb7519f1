use serde::{Deserialize, Serialize};

use super::{lenient_text, new_id, timestamp_now};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: String,
    pub mock_id_ref: String,
    pub question: String,
    pub correct_ans: Option<String>,
    pub user_ans: Option<String>,
    pub feedback: Option<String>,
    pub rating: Option<String>,
    pub user_email: Option<String>,
    pub created_at: Option<String>,
}

/// Body of `POST /api/interviews/userAnswer`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserAnswer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub correct_ans: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_ans: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_email: Option<String>,
    /// Interview token the answer belongs to; stored as `mock_id_ref`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub mock_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnswerRow {
    pub id: String,
    pub mock_id_ref: Option<String>,
    pub question: Option<String>,
    pub correct_ans: Option<String>,
    pub user_ans: Option<String>,
    pub feedback: Option<String>,
    pub rating: Option<String>,
    pub user_email: Option<String>,
    pub created_at: String,
}

impl NewUserAnswer {
    pub fn into_row(self) -> AnswerRow {
        AnswerRow {
            id: new_id(),
            mock_id_ref: self.mock_id,
            question: self.question,
            correct_ans: self.correct_ans,
            user_ans: self.user_ans,
            feedback: self.feedback,
            rating: self.rating,
            user_email: self.user_email,
            created_at: timestamp_now(),
        }
    }
}
