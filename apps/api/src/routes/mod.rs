pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::content::handlers;
use crate::publish::handlers::{handle_publish, handle_publish_status};
use crate::session::handlers::{handle_login, handle_logout};
use crate::settings::handlers::{handle_get_settings, handle_update_settings};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session gate
        .route("/api/v1/session", post(handle_login).delete(handle_logout))
        // Content store
        .route("/api/v1/resume", get(handlers::handle_get_resume))
        .route("/api/v1/resume/issues", get(handlers::handle_get_issues))
        .route("/api/v1/resume/reset", post(handlers::handle_reset))
        .route("/api/v1/resume/basic", patch(handlers::handle_update_basic))
        .route("/api/v1/resume/abilities", post(handlers::handle_add_ability))
        .route(
            "/api/v1/resume/abilities/:index",
            delete(handlers::handle_remove_ability),
        )
        .route("/api/v1/resume/languages", post(handlers::handle_add_language))
        .route(
            "/api/v1/resume/languages/:index",
            delete(handlers::handle_remove_language),
        )
        .route(
            "/api/v1/resume/sections/:section",
            post(handlers::handle_add_entry),
        )
        .route(
            "/api/v1/resume/sections/:section/:id",
            patch(handlers::handle_update_entry).delete(handlers::handle_delete_entry),
        )
        .route(
            "/api/v1/resume/experience/:id/highlights",
            post(handlers::handle_add_highlight),
        )
        .route(
            "/api/v1/resume/experience/:id/highlights/:index",
            put(handlers::handle_replace_highlight).delete(handlers::handle_remove_highlight),
        )
        .route(
            "/api/v1/resume/skills/:id/items",
            post(handlers::handle_add_skill),
        )
        .route(
            "/api/v1/resume/skills/:id/items/:index",
            delete(handlers::handle_remove_skill),
        )
        // Publishing
        .route(
            "/api/v1/settings",
            get(handle_get_settings).put(handle_update_settings),
        )
        .route("/api/v1/publish", post(handle_publish))
        .route("/api/v1/publish/status", get(handle_publish_status))
        .with_state(state)
}
