// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        quiz_item::{AnswerKey, PublicQuizItem},
        user::User,
    },
    store::{catalog, progress, users},
};

/// Points awarded per correctly answered item.
const XP_PER_CORRECT: i64 = 10;

/// Presents a quiz for answering.
///
/// Returns the subject and its items with the correct-choice index stripped.
/// The answer keys are only fetched server-side at grading time.
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Extension(_user): Extension<User>,
    Path(subject_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let subject = catalog::get_subject(&pool, subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;

    let items: Vec<PublicQuizItem> = catalog::list_items_for_subject(&pool, subject_id)
        .await?
        .into_iter()
        .map(PublicQuizItem::from)
        .collect();

    Ok(Json(serde_json::json!({
        "subject": subject,
        "items": items,
    })))
}

/// Grades a quiz submission.
///
/// The body is an untrusted map from item id to selected choice index; both
/// sides arrive as untyped JSON. Absent, unparsable, or out-of-bounds
/// selections count as incorrect, never as an error. The XP award and the
/// progress upsert run in one transaction so a failure persists nothing.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<User>,
    Path(subject_id): Path<i64>,
    Json(answers): Json<HashMap<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let _subject = catalog::get_subject(&pool, subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;

    let keys = catalog::answer_keys_for_subject(&pool, subject_id).await?;

    let total = keys.len() as i64;
    let correct = grade(&keys, &answers);
    let xp_gain = correct * XP_PER_CORRECT;
    let percentage = progress_percent(correct, total);

    let mut tx = pool.begin().await?;
    users::add_xp(&mut *tx, user.id, xp_gain).await?;
    progress::set(&mut *tx, user.id, subject_id, percentage).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = user.id,
        subject_id,
        correct,
        total,
        xp_gain,
        "quiz graded"
    );

    Ok(Json(serde_json::json!({
        "correct": correct,
        "total": total,
        "xp_gain": xp_gain,
        "progress": percentage,
    })))
}

/// Counts correct answers against the authoritative keys.
///
/// Only items belonging to the subject are considered; extra map entries are
/// ignored. A selection must parse to an in-bounds index and match the key.
fn grade(keys: &[AnswerKey], answers: &HashMap<String, Value>) -> i64 {
    let mut correct = 0;

    for key in keys {
        let selected = answers.get(&key.id.to_string()).and_then(parse_selection);

        if let Some(sel) = selected {
            if sel >= 0 && sel < key.n_options && sel == key.answer {
                correct += 1;
            }
        }
    }

    correct
}

/// Parses a submitted selection, which may arrive as a JSON number or a
/// numeric string. Anything else is treated as no selection.
fn parse_selection(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Completion percentage for a graded attempt. A subject with no items is
/// defined as 0% rather than dividing by zero.
fn progress_percent(correct: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }

    (100.0 * correct as f64 / total as f64).round() as i64
}
