// src/handlers/auth.rs

use axum::{
    Extension, Json, extract::State, http::StatusCode, response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, RegisterRequest},
    store::{progress, sessions, users},
    utils::{
        hash::{hash_password, verify_password},
        session::SessionToken,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it. The user row and its
/// zero-progress records (one per subject) are created in a single
/// transaction. Returns 201 Created with a session token and the user object
/// (excluding the password hash).
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let mut tx = pool.begin().await?;

    let user = users::create_user(
        &mut *tx,
        &payload.username,
        &hashed_password,
        &payload.name,
        &payload.role,
    )
    .await?;

    progress::initialize_for_user(&mut *tx, user.id).await?;

    tx.commit().await?;

    let token = sessions::create(&pool, user.id).await?;

    Ok((StatusCode::CREATED, Json(json!({ "token": token, "user": user }))))
}

/// Authenticates a user and opens a session.
///
/// Verifies the username and password against the stored Argon2 hash; an
/// unknown username and a wrong password are indistinguishable to the caller.
pub async fn login(
    State(pool): State<SqlitePool>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = users::find_by_username(&pool, &payload.username)
        .await?
        .ok_or(AppError::AuthError("Invalid credentials".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let token = sessions::create(&pool, user.id).await?;

    Ok(Json(json!({ "token": token, "user": user })))
}

/// Destroys the caller's session.
pub async fn logout(
    State(pool): State<SqlitePool>,
    Extension(token): Extension<SessionToken>,
) -> Result<impl IntoResponse, AppError> {
    sessions::destroy(&pool, &token.0).await?;

    Ok(Json(json!({ "ok": true })))
}
