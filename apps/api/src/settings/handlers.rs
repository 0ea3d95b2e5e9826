use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::session::AdminSession;
use crate::settings::{PublishSettings, SettingsView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// Omitted or blank keeps the stored token.
    pub token: Option<String>,
    pub owner: String,
    pub repo: String,
    pub file_path: String,
}

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<SettingsView> {
    Json(state.settings.read().await.current().view())
}

/// PUT /api/v1/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsView>, AppError> {
    for (name, value) in [
        ("owner", &req.owner),
        ("repo", &req.repo),
        ("filePath", &req.file_path),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{name} cannot be empty")));
        }
    }

    let mut settings = state.settings.write().await;
    let token = match req.token {
        Some(token) if !token.trim().is_empty() => token.trim().to_string(),
        _ => settings.current().token.clone(),
    };
    settings
        .save(PublishSettings {
            token,
            owner: req.owner.trim().to_string(),
            repo: req.repo.trim().to_string(),
            file_path: req.file_path.trim().to_string(),
        })
        .await?;

    Ok(Json(settings.current().view()))
}
