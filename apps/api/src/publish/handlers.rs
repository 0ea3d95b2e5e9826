use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::publish::PublishReceipt;
use crate::session::AdminSession;
use crate::state::AppState;

/// POST /api/v1/publish
///
/// Commits a snapshot of the current record. The store is not locked while
/// the network calls run, and a failure leaves it exactly as it was.
pub async fn handle_publish(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<PublishReceipt>, AppError> {
    let record = state.store.read().await.record().clone();
    let settings = state.settings.read().await.current().clone();

    let receipt = state.publisher.publish(&record, &settings).await?;
    Ok(Json(receipt))
}

#[derive(Debug, Serialize)]
pub struct PublishStatus {
    pub busy: bool,
}

/// GET /api/v1/publish/status
pub async fn handle_publish_status(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<PublishStatus> {
    Json(PublishStatus {
        busy: state.publisher.is_busy(),
    })
}
