// src/models/score_record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row appended to the `results` table for each correctly answered question.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user_id: i64,

    /// Category slug, see `Category::as_str`.
    pub category: String,

    /// Score held at the moment of the correct answer.
    pub score: i64,

    pub total_questions: i64,
    pub hints_used: i64,
    pub created_at: DateTime<Utc>,
}
