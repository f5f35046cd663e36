// src/store.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{error::AppError, models::score_record::ScoreRecord};

/// Durable sink for finalized score records.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists one record. Must only return `Ok` once the write is durable.
    async fn append(&self, record: &ScoreRecord) -> Result<(), AppError>;
}

/// `ResultStore` backed by the `results` table.
#[derive(Debug, Clone)]
pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn append(&self, record: &ScoreRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO results (user_id, category, score, total_questions, hints_used, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.user_id)
        .bind(&record.category)
        .bind(record.score)
        .bind(record.total_questions)
        .bind(record.hints_used)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert result: {:?}", e);
            AppError::StoreWriteFailure(e.to_string())
        })?;

        Ok(())
    }
}
