use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
}

/// POST /api/v1/session
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state.sessions.login(&req.password).await?;
    Ok(Json(LoginResponse { token }))
}

/// DELETE /api/v1/session
pub async fn handle_logout(
    State(state): State<AppState>,
    AdminSession(token): AdminSession,
) -> StatusCode {
    state.sessions.logout(token).await;
    StatusCode::NO_CONTENT
}
