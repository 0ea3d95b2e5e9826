use std::sync::Arc;

use tokio::sync::RwLock;

use crate::content::store::ContentStore;
use crate::publish::Publisher;
use crate::session::SessionGate;
use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one résumé record being edited. Handlers hold the write lock only
    /// for the copy-apply-replace step of an edit.
    pub store: Arc<RwLock<ContentStore>>,
    pub settings: Arc<RwLock<SettingsStore>>,
    pub sessions: Arc<SessionGate>,
    /// Hosting API publisher. Carries the single in-flight busy flag.
    pub publisher: Arc<Publisher>,
}
