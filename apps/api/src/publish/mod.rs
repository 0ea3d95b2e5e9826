//! Publish: commits the current résumé record to the site repository.
//!
//! Pipeline: validate → fetch revision marker → render module → base64 →
//! conditional PUT. The PUT is only attempted once the fetch has resolved,
//! and at most one publish runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::content::module::{render_module, ModuleError};
use crate::content::validation::validate_record;
use crate::github::{ContentUpdate, ContentsApi};
use crate::models::resume::ResumeRecord;
use crate::settings::PublishSettings;

pub mod handlers;

pub const COMMIT_MESSAGE: &str = "update: resume content via Admin CMS";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("A publish is already in progress")]
    Busy,

    #[error("Missing token: configure a GitHub token in settings before publishing")]
    MissingToken,

    #[error("Resume has blank required fields: {0}")]
    Invalid(String),

    #[error("Failed to fetch file SHA ({message}). Check your token and repo settings.")]
    RevisionFetch {
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    #[error(transparent)]
    Render(#[from] ModuleError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub path: String,
    pub message: String,
    pub previous_sha: String,
    pub content_sha: Option<String>,
    pub commit_sha: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// Base64 of the module's UTF-8 bytes; multi-byte characters survive intact.
pub fn encode_content(module: &str) -> String {
    STANDARD.encode(module.as_bytes())
}

pub struct Publisher {
    api: Arc<dyn ContentsApi>,
    busy: AtomicBool,
}

/// Clears the busy flag when the publish finishes, whichever way it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Publisher {
    pub fn new(api: Arc<dyn ContentsApi>) -> Self {
        Self {
            api,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, PublishError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(&self.busy))
            .map_err(|_| PublishError::Busy)
    }

    /// Commits `record` to the file named by `settings`.
    ///
    /// `record` is a snapshot; nothing here mutates the caller's copy, so a
    /// failure leaves local edits exactly as they were.
    pub async fn publish(
        &self,
        record: &ResumeRecord,
        settings: &PublishSettings,
    ) -> Result<PublishReceipt, PublishError> {
        if !settings.has_token() {
            return Err(PublishError::MissingToken);
        }
        let _guard = self.acquire()?;

        let report = validate_record(record);
        if !report.passed {
            return Err(PublishError::Invalid(report.summary()));
        }

        let target = settings.target();

        // 1. Current revision marker
        let sha = self
            .api
            .fetch_revision(&target, &settings.token)
            .await
            .map_err(|e| PublishError::RevisionFetch {
                status: e.status(),
                message: e.user_message(),
            })?;

        // 2. Serialize and encode
        let module = render_module(record)?;
        let update = ContentUpdate {
            message: COMMIT_MESSAGE.to_string(),
            content: encode_content(&module),
            sha: sha.clone(),
        };

        // 3. Conditional update
        let outcome = self
            .api
            .put_contents(&target, &settings.token, &update)
            .await
            .map_err(|e| {
                warn!("Publish to {} rejected: {e}", target.path);
                PublishError::Rejected {
                    status: e.status(),
                    message: e.user_message(),
                }
            })?;

        info!(
            "Published resume to {}/{}:{} (base {sha})",
            target.owner, target.repo, target.path
        );

        Ok(PublishReceipt {
            path: target.path,
            message: COMMIT_MESSAGE.to_string(),
            previous_sha: sha,
            content_sha: outcome.content_sha,
            commit_sha: outcome.commit_sha,
            published_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::module::parse_module;
    use crate::content::seed::bundled_record;
    use crate::github::fake::{Call, FakeContentsApi};

    fn settings() -> PublishSettings {
        PublishSettings {
            token: "ghp_test".to_string(),
            owner: "octo".to_string(),
            repo: "octo.github.io".to_string(),
            file_path: "src/data/resumeData.ts".to_string(),
        }
    }

    fn decode(content: &str) -> String {
        String::from_utf8(STANDARD.decode(content).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_keeps_multibyte_characters() {
        let module = "export const resumeData = {\"name\": \"Mariana Sá – Lisboa\"};";
        assert_eq!(decode(&encode_content(module)), module);
    }

    #[tokio::test]
    async fn test_publish_fetches_then_puts_with_marker() {
        let api = Arc::new(FakeContentsApi::accepting("abc123"));
        let publisher = Publisher::new(api.clone());
        let record = bundled_record().unwrap();

        let receipt = publisher.publish(&record, &settings()).await.unwrap();

        assert_eq!(receipt.previous_sha, "abc123");
        assert_eq!(receipt.commit_sha.as_deref(), Some("new-commit-sha"));
        assert_eq!(receipt.message, COMMIT_MESSAGE);

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Fetch(settings().target()));
        let Call::Put(file, update) = &calls[1] else {
            panic!("expected a PUT after the fetch, got {:?}", calls[1]);
        };
        assert_eq!(file, &settings().target());
        assert_eq!(update.sha, "abc123");
        assert_eq!(update.message, COMMIT_MESSAGE);
        assert_eq!(parse_module(&decode(&update.content)).unwrap(), record);
        assert!(!publisher.is_busy());
    }

    #[tokio::test]
    async fn test_failed_fetch_never_attempts_update() {
        let api = Arc::new(FakeContentsApi::failing_fetch(401, "Bad credentials"));
        let publisher = Publisher::new(api.clone());

        let err = publisher
            .publish(&bundled_record().unwrap(), &settings())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PublishError::RevisionFetch { status: Some(401), ref message } if message == "Bad credentials"
        ));
        assert_eq!(api.calls().len(), 1);
        assert!(!publisher.is_busy());
    }

    #[tokio::test]
    async fn test_rejected_update_reports_api_message() {
        let api = Arc::new(FakeContentsApi::rejecting_put(
            "abc123",
            409,
            "src/data/resumeData.ts does not match abc123",
        ));
        let publisher = Publisher::new(api.clone());
        let record = bundled_record().unwrap();
        let before = record.clone();

        let err = publisher.publish(&record, &settings()).await.unwrap_err();

        match err {
            PublishError::Rejected { status, message } => {
                assert_eq!(status, Some(409));
                assert_eq!(message, "src/data/resumeData.ts does not match abc123");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert_eq!(record, before);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_calls() {
        let api = Arc::new(FakeContentsApi::accepting("abc123"));
        let publisher = Publisher::new(api.clone());
        let no_token = PublishSettings {
            token: "  ".to_string(),
            ..settings()
        };

        let err = publisher
            .publish(&bundled_record().unwrap(), &no_token)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::MissingToken));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_record_makes_no_calls() {
        let api = Arc::new(FakeContentsApi::accepting("abc123"));
        let publisher = Publisher::new(api.clone());
        let mut record = bundled_record().unwrap();
        record.name.clear();

        let err = publisher.publish(&record, &settings()).await.unwrap_err();

        assert!(matches!(err, PublishError::Invalid(ref s) if s == "basic.name"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_second_publish_while_busy_is_refused() {
        let api = Arc::new(FakeContentsApi::accepting("abc123"));
        let publisher = Publisher::new(api.clone());

        let guard = publisher.acquire().unwrap();
        let err = publisher
            .publish(&bundled_record().unwrap(), &settings())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Busy));
        assert!(api.calls().is_empty());

        drop(guard);
        assert!(publisher.publish(&bundled_record().unwrap(), &settings()).await.is_ok());
    }
}
