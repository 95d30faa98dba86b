// src/store/sessions.rs
//
// Session Gate: opaque tokens issued at login, resolved on every request.
// A token row maps to a user identity; logout deletes the row.

use sqlx::{Executor, Sqlite};
use uuid::Uuid;

use crate::{error::AppError, models::user::User};

/// Issues a fresh opaque session token for the user.
pub async fn create<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    user_id: i64,
) -> Result<String, AppError> {
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
        .bind(&token)
        .bind(user_id)
        .execute(ex)
        .await?;

    Ok(token)
}

/// Resolves a session token to the full user record, or `None` when the
/// token is unknown.
pub async fn resolve<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    token: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.password, u.name, u.role, u.xp, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(ex)
    .await?;

    Ok(user)
}

/// Destroys a session. Deleting an unknown token is a no-op.
pub async fn destroy<'e>(
    ex: impl Executor<'e, Database = Sqlite>,
    token: &str,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(ex)
        .await?;

    Ok(())
}
