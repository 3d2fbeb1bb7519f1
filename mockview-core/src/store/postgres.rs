use async_trait::async_trait;
use sqlx::PgPool;

use super::InterviewStore;
use crate::db;
use crate::error::{MockviewError, Result};
use crate::models::{MockInterview, NewMockInterview, NewUserAnswer, UserAnswer};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InterviewStore for PgStore {
    async fn create_interview(&self, new: NewMockInterview) -> Result<MockInterview> {
        let row = new.into_row();
        let inserted = sqlx::query_as::<_, MockInterview>(
            r#"
            INSERT INTO mock_interview
                (id, mock_id, json_mock_resp, job_position, job_desc, job_experience, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.mock_id)
        .bind(&row.json_mock_resp)
        .bind(&row.job_position)
        .bind(&row.job_desc)
        .bind(&row.job_experience)
        .bind(&row.created_by)
        .bind(&row.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(mock_id = %inserted.mock_id, "Stored mock interview");
        Ok(inserted)
    }

    async fn find_interview(&self, mock_id: &str) -> Result<Option<MockInterview>> {
        let found = sqlx::query_as::<_, MockInterview>(
            "SELECT * FROM mock_interview WHERE mock_id = $1 LIMIT 1",
        )
        .bind(mock_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found)
    }

    async fn list_interviews_by_creator(&self, created_by: &str) -> Result<Vec<MockInterview>> {
        let rows = sqlx::query_as::<_, MockInterview>(
            "SELECT * FROM mock_interview WHERE created_by = $1 ORDER BY created_at",
        )
        .bind(created_by)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_answer(&self, new: NewUserAnswer) -> Result<UserAnswer> {
        let row = new.into_row();
        let mock_id = row.mock_id_ref.clone().unwrap_or_default();
        let inserted = sqlx::query_as::<_, UserAnswer>(
            r#"
            INSERT INTO user_answer
                (id, mock_id_ref, question, correct_ans, user_ans, feedback, rating, user_email, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.mock_id_ref)
        .bind(&row.question)
        .bind(&row.correct_ans)
        .bind(&row.user_ans)
        .bind(&row.feedback)
        .bind(&row.rating)
        .bind(&row.user_email)
        .bind(&row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MockviewError::from_write(e, &mock_id))?;

        tracing::info!(mock_id = %inserted.mock_id_ref, id = %inserted.id, "Stored user answer");
        Ok(inserted)
    }

    async fn list_answers(&self, mock_id: &str) -> Result<Vec<UserAnswer>> {
        let rows = sqlx::query_as::<_, UserAnswer>(
            "SELECT * FROM user_answer WHERE mock_id_ref = $1 ORDER BY created_at",
        )
        .bind(mock_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn health(&self) -> Result<String> {
        Ok(db::health_check(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Connect and bootstrap the schema; None when no database is reachable.
    async fn make_store() -> Option<PgStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.ok()?;
        db::migrate(&pool).await.ok()?;
        Some(PgStore::new(pool))
    }

    #[tokio::test]
    async fn test_interview_roundtrip() {
        let store = match make_store().await {
            Some(s) => s,
            None => {
                eprintln!("Skipping test_interview_roundtrip: DB unavailable");
                return;
            }
        };

        let creator = format!("pg-roundtrip-{}@x.com", uuid::Uuid::new_v4());
        let new: NewMockInterview = serde_json::from_value(json!({
            "jobPosition": "Engineer",
            "jobDesc": "Backend",
            "jobExperience": "3",
            "createdBy": creator,
            "jsonMockResp": "[{\"q\":\"Q1\"}]"
        }))
        .unwrap();

        let created = store.create_interview(new).await.unwrap();
        let found = store.find_interview(&created.mock_id).await.unwrap();
        assert_eq!(found.as_ref(), Some(&created));

        let listed = store.list_interviews_by_creator(&creator).await.unwrap();
        assert_eq!(listed.len(), 1);

        sqlx::query("DELETE FROM mock_interview WHERE created_by = $1")
            .bind(&creator)
            .execute(store.pool())
            .await
            .ok();
    }

    #[tokio::test]
    async fn test_answer_for_unknown_interview_violates_foreign_key() {
        let store = match make_store().await {
            Some(s) => s,
            None => {
                eprintln!("Skipping test_answer_for_unknown_interview_violates_foreign_key: DB unavailable");
                return;
            }
        };

        let new = NewUserAnswer {
            question: Some("Q1".into()),
            mock_id: Some(uuid::Uuid::new_v4().to_string()),
            ..Default::default()
        };
        let err = store.create_answer(new).await.unwrap_err();
        assert!(
            matches!(err, MockviewError::Constraint(_)),
            "expected constraint violation, got {}",
            err
        );
    }

    #[tokio::test]
    async fn test_missing_blob_violates_not_null() {
        let store = match make_store().await {
            Some(s) => s,
            None => {
                eprintln!("Skipping test_missing_blob_violates_not_null: DB unavailable");
                return;
            }
        };

        let err = store
            .create_interview(NewMockInterview::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MockviewError::Database(_)));
    }
}
