// src/store/catalog.rs

use sqlx::{Executor, Sqlite};

use crate::{
    error::AppError,
    models::{
        quiz_item::{AnswerKey, QuizItem},
        subject::Subject,
    },
};

/// Lists all subjects in creation order.
pub async fn list_subjects<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
) -> Result<Vec<Subject>, AppError> {
    let subjects = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY id")
        .fetch_all(ex)
        .await?;

    Ok(subjects)
}

pub async fn get_subject<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    id: i64,
) -> Result<Option<Subject>, AppError> {
    let subject = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects WHERE id = ?")
        .bind(id)
        .fetch_optional(ex)
        .await?;

    Ok(subject)
}

/// Lists a subject's quiz items in creation order, including the correct
/// index. Callers rendering a quiz for answering must strip it via
/// `PublicQuizItem`.
pub async fn list_items_for_subject<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    subject_id: i64,
) -> Result<Vec<QuizItem>, AppError> {
    let items = sqlx::query_as::<_, QuizItem>(
        r#"
        SELECT id, subject_id, question, options, answer
        FROM quiz_items
        WHERE subject_id = ?
        ORDER BY id
        "#,
    )
    .bind(subject_id)
    .fetch_all(ex)
    .await?;

    Ok(items)
}

/// Fetches the authoritative answer keys for a subject at grading time.
pub async fn answer_keys_for_subject<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    subject_id: i64,
) -> Result<Vec<AnswerKey>, AppError> {
    let keys = sqlx::query_as::<_, AnswerKey>(
        r#"
        SELECT id, answer, json_array_length(options) AS n_options
        FROM quiz_items
        WHERE subject_id = ?
        ORDER BY id
        "#,
    )
    .bind(subject_id)
    .fetch_all(ex)
    .await?;

    Ok(keys)
}
