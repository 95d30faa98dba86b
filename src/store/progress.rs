// src/store/progress.rs

use sqlx::{Executor, Sqlite};

use crate::{error::AppError, models::progress::SubjectProgress};

/// Returns the completion percentage for (user, subject), defaulting to 0
/// when no record exists.
pub async fn get<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
    subject_id: i64,
) -> Result<i64, AppError> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT progress FROM user_progress WHERE user_id = ? AND subject_id = ?")
            .bind(user_id)
            .bind(subject_id)
            .fetch_optional(ex)
            .await?;

    Ok(row.map(|(p,)| p).unwrap_or(0))
}

/// Upserts the completion percentage for (user, subject). Each submission
/// overwrites the prior value; progress is never averaged across attempts.
pub async fn set<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
    subject_id: i64,
    percentage: i64,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, subject_id, progress)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, subject_id) DO UPDATE SET progress = excluded.progress
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .bind(percentage)
    .execute(ex)
    .await?;

    Ok(())
}

/// Creates a zero-percentage record for every current subject.
/// Called once, inside the registration transaction.
pub async fn initialize_for_user<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, subject_id, progress)
        SELECT ?, id, 0 FROM subjects
        "#,
    )
    .bind(user_id)
    .execute(ex)
    .await?;

    Ok(())
}

/// Student dashboard rows: every subject joined with the user's progress,
/// in subject creation order.
pub async fn subjects_with_progress<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
) -> Result<Vec<SubjectProgress>, AppError> {
    let rows = sqlx::query_as::<_, SubjectProgress>(
        r#"
        SELECT s.id, s.name, IFNULL(up.progress, 0) AS progress
        FROM subjects s
        LEFT JOIN user_progress up
            ON up.subject_id = s.id AND up.user_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(user_id)
    .fetch_all(ex)
    .await?;

    Ok(rows)
}
