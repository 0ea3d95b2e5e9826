//! Axum route handlers for the résumé content API.
//!
//! Every mutating handler returns the full updated record so the form can
//! re-render from a single source of truth.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::content::entries::FieldValue;
use crate::content::sections::Section;
use crate::content::validation::{validate_record, RecordValidationResult};
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::session::AdminSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BasicFieldUpdate {
    /// `name`, `title`, `summary` or `contact.<field>`.
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub id: Uuid,
    pub resume: ResumeRecord,
}

async fn current(state: &AppState) -> Json<ResumeRecord> {
    Json(state.store.read().await.record().clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
///
/// Public: this is the data the site renders.
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeRecord> {
    current(&state).await
}

/// GET /api/v1/resume/issues
pub async fn handle_get_issues(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<RecordValidationResult> {
    Json(validate_record(state.store.read().await.record()))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<ResumeRecord> {
    let record = state.store.write().await.reset().clone();
    info!("Discarded unpublished edits");
    Json(record)
}

/// PATCH /api/v1/resume/basic
pub async fn handle_update_basic(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<BasicFieldUpdate>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .write()
        .await
        .set_basic_field(&req.field, req.value)?;
    Ok(current(&state).await)
}

/// POST /api/v1/resume/abilities
pub async fn handle_add_ability(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<TextValue>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.add_ability(&req.value)?;
    Ok(current(&state).await)
}

/// DELETE /api/v1/resume/abilities/:index
pub async fn handle_remove_ability(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(index): Path<usize>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.remove_ability(index)?;
    Ok(current(&state).await)
}

/// POST /api/v1/resume/languages
pub async fn handle_add_language(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<TextValue>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.add_language(&req.value)?;
    Ok(current(&state).await)
}

/// DELETE /api/v1/resume/languages/:index
pub async fn handle_remove_language(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(index): Path<usize>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.remove_language(index)?;
    Ok(current(&state).await)
}

/// POST /api/v1/resume/sections/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(section): Path<Section>,
) -> Json<AddEntryResponse> {
    let mut store = state.store.write().await;
    let id = store.add_entry(section);
    Json(AddEntryResponse {
        id,
        resume: store.record().clone(),
    })
}

/// PATCH /api/v1/resume/sections/:section/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((section, id)): Path<(Section, Uuid)>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .write()
        .await
        .set_entry_field(section, id, &req.field, req.value)?;
    Ok(current(&state).await)
}

/// DELETE /api/v1/resume/sections/:section/:id?confirm=true
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((section, id)): Path<(Section, Uuid)>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .write()
        .await
        .delete_entry(section, id, query.confirm)?;
    Ok(current(&state).await)
}

/// POST /api/v1/resume/experience/:id/highlights
pub async fn handle_add_highlight(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<TextValue>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.add_highlight(id, &req.value)?;
    Ok(current(&state).await)
}

/// PUT /api/v1/resume/experience/:id/highlights/:index
pub async fn handle_replace_highlight(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<TextValue>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .write()
        .await
        .replace_highlight(id, index, &req.value)?;
    Ok(current(&state).await)
}

/// DELETE /api/v1/resume/experience/:id/highlights/:index
pub async fn handle_remove_highlight(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.remove_highlight(id, index)?;
    Ok(current(&state).await)
}

/// POST /api/v1/resume/skills/:id/items
pub async fn handle_add_skill(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<TextValue>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.add_skill(id, &req.value)?;
    Ok(current(&state).await)
}

/// DELETE /api/v1/resume/skills/:id/items/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.store.write().await.remove_skill(id, index)?;
    Ok(current(&state).await)
}
