// src/models/progress.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_progress' table: one row per (user, subject),
/// overwritten on each quiz submission for that subject.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i64,
    pub user_id: i64,
    pub subject_id: i64,
    /// Completion percentage, 0-100.
    pub progress: i64,
}

/// Joined row for the student dashboard: a subject plus the caller's
/// completion percentage (0 when no record exists).
#[derive(Debug, Serialize, FromRow)]
pub struct SubjectProgress {
    pub id: i64,
    pub name: String,
    pub progress: i64,
}
