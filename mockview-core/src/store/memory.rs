use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InterviewStore;
use crate::error::{MockviewError, Result};
use crate::models::{MockInterview, NewMockInterview, NewUserAnswer, UserAnswer};

#[derive(Default)]
struct Tables {
    interviews: Vec<MockInterview>,
    answers: Vec<UserAnswer>,
}

/// In-process store with the same constraints as the PostgreSQL schema:
/// NOT NULL columns, unique `mock_id`, and the `mock_id_ref` foreign key.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn required(value: Option<String>, column: &str) -> Result<String> {
    value.ok_or_else(|| MockviewError::Constraint(format!("{} must not be null", column)))
}

#[async_trait]
impl InterviewStore for MemoryStore {
    async fn create_interview(&self, new: NewMockInterview) -> Result<MockInterview> {
        let row = new.into_row();
        let interview = MockInterview {
            id: row.id,
            mock_id: row.mock_id,
            json_mock_resp: required(row.json_mock_resp, "json_mock_resp")?,
            job_position: row.job_position,
            job_desc: row.job_desc,
            job_experience: row.job_experience,
            created_by: row.created_by,
            created_at: row.created_at,
        };

        let mut tables = self.tables.write().await;
        if tables.interviews.iter().any(|i| i.mock_id == interview.mock_id) {
            return Err(MockviewError::Constraint(format!(
                "duplicate mock_id {}",
                interview.mock_id
            )));
        }
        tables.interviews.push(interview.clone());
        Ok(interview)
    }

    async fn find_interview(&self, mock_id: &str) -> Result<Option<MockInterview>> {
        let tables = self.tables.read().await;
        Ok(tables.interviews.iter().find(|i| i.mock_id == mock_id).cloned())
    }

    async fn list_interviews_by_creator(&self, created_by: &str) -> Result<Vec<MockInterview>> {
        let tables = self.tables.read().await;
        Ok(tables
            .interviews
            .iter()
            .filter(|i| i.created_by.as_deref() == Some(created_by))
            .cloned()
            .collect())
    }

    async fn create_answer(&self, new: NewUserAnswer) -> Result<UserAnswer> {
        let row = new.into_row();
        let mock_id_ref = required(row.mock_id_ref, "mock_id_ref")?;
        let answer = UserAnswer {
            id: row.id,
            question: required(row.question, "question")?,
            correct_ans: row.correct_ans,
            user_ans: row.user_ans,
            feedback: row.feedback,
            rating: row.rating,
            user_email: row.user_email,
            created_at: Some(row.created_at),
            mock_id_ref,
        };

        let mut tables = self.tables.write().await;
        if !tables.interviews.iter().any(|i| i.mock_id == answer.mock_id_ref) {
            return Err(MockviewError::unknown_interview(&answer.mock_id_ref));
        }
        tables.answers.push(answer.clone());
        Ok(answer)
    }

    async fn list_answers(&self, mock_id: &str) -> Result<Vec<UserAnswer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .answers
            .iter()
            .filter(|a| a.mock_id_ref == mock_id)
            .cloned()
            .collect())
    }

    async fn health(&self) -> Result<String> {
        let tables = self.tables.read().await;
        Ok(format!(
            "memory ({} interviews, {} answers)",
            tables.interviews.len(),
            tables.answers.len()
        ))
    }
}
