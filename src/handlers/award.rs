// src/handlers/award.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::AppError, models::user::User, state::AppState, store::users};

/// DTO for awarding XP from auxiliary activities (e.g., a side game).
/// The amount arrives as untrusted JSON and may be a number or a string.
#[derive(Debug, Deserialize)]
pub struct AwardRequest {
    pub xp: Value,
}

/// Unconditionally awards XP to the caller, capped per call.
///
/// The per-call amount is clamped to `config.max_award_xp` rather than
/// trusting the client with an unbounded increment. Negative amounts are
/// rejected; unparsable amounts are a validation error.
pub async fn award_xp(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<AwardRequest>,
) -> Result<impl IntoResponse, AppError> {
    let requested = match &payload.xp {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or(AppError::BadRequest("xp must be an integer".to_string()))?;

    if requested < 0 {
        return Err(AppError::BadRequest("xp must be non-negative".to_string()));
    }

    let granted = requested.min(state.config.max_award_xp);

    let new_total = users::add_xp(&state.pool, user.id, granted).await?;

    tracing::info!(user_id = user.id, granted, new_total, "xp awarded");

    Ok(Json(serde_json::json!({
        "ok": true,
        "xp": new_total,
    })))
}
