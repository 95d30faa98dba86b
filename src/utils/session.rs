// src/utils/session.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, models::user::User, state::AppState, store::sessions};

/// The bearer token the current request authenticated with.
/// Stored alongside the resolved user so logout can destroy the session.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Axum Middleware: Session Gate.
///
/// Intercepts requests, reads the 'Authorization: Bearer <token>' header and
/// resolves the token to a user via the sessions table. If valid, injects the
/// resolved `User` (and the token) into request extensions for handlers to
/// use. If missing or unknown, returns 401 Unauthorized.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => header[7..].to_string(),
        _ => return Err(AppError::AuthError("Missing session token".to_string())),
    };

    match sessions::resolve(&state.pool, &token).await? {
        Some(user) => {
            req.extensions_mut().insert(user);
            req.extensions_mut().insert(SessionToken(token));
            Ok(next.run(req).await)
        }
        None => Err(AppError::AuthError("Invalid session token".to_string())),
    }
}

/// Axum Middleware: student-only routes.
/// Must be used AFTER `auth_middleware`.
pub async fn student_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_role(&req, "student")?;
    Ok(next.run(req).await)
}

/// Axum Middleware: teacher-only routes.
/// Must be used AFTER `auth_middleware`.
pub async fn teacher_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_role(&req, "teacher")?;
    Ok(next.run(req).await)
}

fn require_role(req: &Request<Body>, role: &str) -> Result<(), AppError> {
    let user = req
        .extensions()
        .get::<User>()
        .ok_or(AppError::AuthError("Not authenticated".to_string()))?;

    if user.role != role {
        return Err(AppError::Forbidden(format!("Requires role '{}'", role)));
    }

    Ok(())
}
