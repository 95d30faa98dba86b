// src/store/users.rs

use sqlx::{Executor, Sqlite};

use crate::{error::AppError, models::user::User};

/// Inserts a new user with an already-hashed credential.
///
/// Maps a unique-constraint violation on `username` to `Conflict` so the
/// caller can report a duplicate identity without inspecting SQL errors.
pub async fn create_user<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    username: &str,
    password_hash: &str,
    name: &str,
    role: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password, name, role)
        VALUES (?, ?, ?, ?)
        RETURNING id, username, password, name, role, xp, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .fetch_one(ex)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("Username '{}' already exists", username))
        }
        _ => {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::from(e)
        }
    })
}

pub async fn find_by_username<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, name, role, xp, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(ex)
    .await?;

    Ok(user)
}

pub async fn get_by_id<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    id: i64,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, name, role, xp, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(user)
}

pub async fn list_by_role<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    role: &str,
) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, name, role, xp, created_at
        FROM users
        WHERE role = ?
        ORDER BY id
        "#,
    )
    .bind(role)
    .fetch_all(ex)
    .await?;

    Ok(users)
}

/// Adds `delta` experience points and returns the new total.
///
/// `delta` must be non-negative; repeated calls add repeatedly (the quiz
/// workflow is deliberately not idempotent on XP).
pub async fn add_xp<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
    delta: i64,
) -> Result<i64, AppError> {
    debug_assert!(delta >= 0);

    let (xp,): (i64,) = sqlx::query_as(
        r#"
        UPDATE users
        SET xp = xp + ?
        WHERE id = ?
        RETURNING xp
        "#,
    )
    .bind(delta)
    .bind(user_id)
    .fetch_one(ex)
    .await?;

    Ok(xp)
}
