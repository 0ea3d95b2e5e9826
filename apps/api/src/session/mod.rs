//! Session gate for the admin routes.
//!
//! A password check that hands out opaque tokens held in memory. This is a
//! view-state gate, not access control: anything needing real protection has
//! to sit behind an external auth layer.

use std::collections::HashSet;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;

pub struct SessionGate {
    secret: String,
    active: RwLock<HashSet<Uuid>>,
}

impl SessionGate {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            active: RwLock::new(HashSet::new()),
        }
    }

    /// Opens a session when `password` matches; otherwise nothing is recorded.
    pub async fn login(&self, password: &str) -> Result<Uuid, AppError> {
        if password != self.secret {
            warn!("Rejected admin login attempt");
            return Err(AppError::Unauthorized);
        }
        let token = Uuid::new_v4();
        self.active.write().await.insert(token);
        info!("Admin session opened");
        Ok(token)
    }

    pub async fn logout(&self, token: Uuid) -> bool {
        self.active.write().await.remove(&token)
    }

    pub async fn is_active(&self, token: Uuid) -> bool {
        self.active.read().await.contains(&token)
    }
}

/// Extractor for handlers that require an open session.
/// Reads `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession(pub Uuid);

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        if state.sessions.is_active(token).await {
            Ok(AdminSession(token))
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let gate = SessionGate::new("hunter2".to_string());
        let token = gate.login("hunter2").await.unwrap();
        assert!(gate.is_active(token).await);
    }

    #[tokio::test]
    async fn test_wrong_password_opens_nothing() {
        let gate = SessionGate::new("hunter2".to_string());
        let err = gate.login("hunter3").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        assert!(gate.active.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_logout_closes_session() {
        let gate = SessionGate::new("hunter2".to_string());
        let token = gate.login("hunter2").await.unwrap();
        assert!(gate.logout(token).await);
        assert!(!gate.is_active(token).await);
        assert!(!gate.logout(token).await);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let token = Uuid::new_v4();
        let (parts, _) = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts), Some(token));

        let (parts, _) = Request::builder()
            .header(AUTHORIZATION, "Basic abc")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
