//! Storage seam for the HTTP layer.
//!
//! Handlers receive an `Arc<dyn InterviewStore>` so the backend can be
//! swapped: `PgStore` in production, `MemoryStore` in tests or when the
//! `memory` backend is configured.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::db;
use crate::error::Result;
use crate::models::{MockInterview, NewMockInterview, NewUserAnswer, UserAnswer};

#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Assign identifiers and a timestamp, then insert.
    async fn create_interview(&self, new: NewMockInterview) -> Result<MockInterview>;

    async fn find_interview(&self, mock_id: &str) -> Result<Option<MockInterview>>;

    async fn list_interviews_by_creator(&self, created_by: &str) -> Result<Vec<MockInterview>>;

    /// Insert an answer. Fails with `Constraint` when `mockId` points at no
    /// interview.
    async fn create_answer(&self, new: NewUserAnswer) -> Result<UserAnswer>;

    async fn list_answers(&self, mock_id: &str) -> Result<Vec<UserAnswer>>;

    /// Short description of the backend, e.g. the PostgreSQL version string.
    async fn health(&self) -> Result<String>;
}

/// Build the configured backend. The postgres backend connects and
/// bootstraps the schema before returning.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn InterviewStore>> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = db::create_pool(config).await?;
            db::migrate(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_memory_backend() {
        let config = DatabaseConfig {
            backend: StorageBackend::Memory,
            ..DatabaseConfig::default()
        };
        let store = connect(&config).await.unwrap();
        assert!(store.health().await.unwrap().starts_with("memory"));
    }
}
