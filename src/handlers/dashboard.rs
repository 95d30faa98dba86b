// src/handlers/dashboard.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::user::User,
    store::{progress, users},
};

/// Student dashboard: every subject joined with the caller's completion
/// percentage, plus the caller's profile.
pub async fn student_dashboard(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = progress::subjects_with_progress(&pool, user.id).await?;

    Ok(Json(serde_json::json!({
        "user": user,
        "subjects": subjects,
    })))
}

/// Teacher dashboard: all students and their accumulated XP.
pub async fn teacher_dashboard(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let students = users::list_by_role(&pool, "student").await?;

    Ok(Json(serde_json::json!({
        "user": user,
        "students": students,
    })))
}
