use crate::config::DatabaseConfig;
use crate::error::{MockviewError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let url = config.url.as_deref().ok_or_else(|| {
        MockviewError::Config(::config::ConfigError::NotFound("database.url".to_string()))
    })?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;
    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> std::result::Result<String, sqlx::Error> {
    let row: (String,) = sqlx::query_as("SELECT version()").fetch_one(pool).await?;
    Ok(row.0)
}

/// Create both tables and their lookup indexes if they are missing.
pub async fn migrate(pool: &PgPool) -> std::result::Result<(), sqlx::Error> {
    tracing::info!("Running schema bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mock_interview (
            id TEXT PRIMARY KEY,
            mock_id TEXT NOT NULL UNIQUE,
            json_mock_resp TEXT NOT NULL,
            job_position TEXT,
            job_desc TEXT,
            job_experience TEXT,
            created_by TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_answer (
            id TEXT PRIMARY KEY,
            mock_id_ref TEXT NOT NULL REFERENCES mock_interview(mock_id) ON DELETE CASCADE,
            question TEXT NOT NULL,
            correct_ans TEXT,
            user_ans TEXT,
            feedback TEXT,
            rating TEXT,
            user_email TEXT,
            created_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_mock_interview_created_by ON mock_interview (created_by)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_answer_mock_id_ref ON user_answer (mock_id_ref)")
        .execute(pool)
        .await?;

    Ok(())
}
