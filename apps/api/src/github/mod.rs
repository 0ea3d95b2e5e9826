//! GitHub contents API client: the only code that talks to the hosting API.
//!
//! Two calls are used: read a file's current blob `sha` (the revision marker)
//! and PUT new file content guarded by that `sha`. Both go through the
//! [`ContentsApi`] trait so the publish path can run against a fake in tests.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("folio-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl GithubError {
    /// The message worth showing to a user: the API's own text when there is one.
    pub fn user_message(&self) -> String {
        match self {
            GithubError::Http(e) => e.to_string(),
            GithubError::Api { message, .. } => message.clone(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GithubError::Http(e) => e.status().map(|s| s.as_u16()),
            GithubError::Api { status, .. } => Some(*status),
        }
    }
}

/// A file inside a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoFile {
    pub owner: String,
    pub repo: String,
    pub path: String,
}

impl RepoFile {
    pub fn contents_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path.trim_start_matches('/')
        )
    }
}

/// Body of the create/update request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentUpdate {
    pub message: String,
    /// Base64 of the new file content.
    pub content: String,
    /// Revision marker the update is conditioned on.
    pub sha: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommitOutcome {
    pub content_sha: Option<String>,
    pub commit_sha: Option<String>,
}

#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// Returns the current blob `sha` of `file`.
    async fn fetch_revision(&self, file: &RepoFile, token: &str) -> Result<String, GithubError>;

    async fn put_contents(
        &self,
        file: &RepoFile,
        token: &str,
        update: &ContentUpdate,
    ) -> Result<CommitOutcome, GithubError>;
}

#[derive(Debug, Deserialize)]
struct FileMetadata {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: Option<ShaRef>,
    commit: Option<ShaRef>,
}

#[derive(Debug, Deserialize)]
struct ShaRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GithubErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
}

impl GithubClient {
    pub fn new(api_base: String) -> Result<Self, GithubError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()?,
            api_base,
        })
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .bearer_auth(token)
            .header("accept", ACCEPT_HEADER)
    }
}

/// Turns a non-success response into [`GithubError::Api`], preferring the JSON `message`.
async fn api_error(response: reqwest::Response) -> GithubError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GithubErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    GithubError::Api { status, message }
}

#[async_trait]
impl ContentsApi for GithubClient {
    async fn fetch_revision(&self, file: &RepoFile, token: &str) -> Result<String, GithubError> {
        let url = file.contents_url(&self.api_base);
        debug!("GET {url}");

        let response = self
            .authorized(self.client.get(&url), token)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!("Revision fetch for {} failed: {err}", file.path);
            return Err(err);
        }

        let metadata: FileMetadata = response.json().await?;
        Ok(metadata.sha)
    }

    async fn put_contents(
        &self,
        file: &RepoFile,
        token: &str,
        update: &ContentUpdate,
    ) -> Result<CommitOutcome, GithubError> {
        let url = file.contents_url(&self.api_base);
        debug!("PUT {url} (base sha {})", update.sha);

        let response = self
            .authorized(self.client.put(&url), token)
            .json(update)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!("Content update for {} rejected: {err}", file.path);
            return Err(err);
        }

        let body: PutResponse = response.json().await?;
        Ok(CommitOutcome {
            content_sha: body.content.map(|c| c.sha),
            commit_sha: body.commit.map(|c| c.sha),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> RepoFile {
        RepoFile {
            owner: "octo".to_string(),
            repo: "octo.github.io".to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_contents_url() {
        assert_eq!(
            file("src/data/resumeData.ts").contents_url(DEFAULT_API_URL),
            "https://api.github.com/repos/octo/octo.github.io/contents/src/data/resumeData.ts"
        );
    }

    #[test]
    fn test_contents_url_trims_slashes() {
        assert_eq!(
            file("/data.ts").contents_url("http://localhost:9000/"),
            "http://localhost:9000/repos/octo/octo.github.io/contents/data.ts"
        );
    }

    #[test]
    fn test_update_body_shape() {
        let update = ContentUpdate {
            message: "update".to_string(),
            content: "ZXhwb3J0".to_string(),
            sha: "abc123".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "message": "update", "content": "ZXhwb3J0", "sha": "abc123" })
        );
    }

    #[test]
    fn test_api_error_user_message_is_verbatim() {
        let err = GithubError::Api {
            status: 409,
            message: "is at 1a2b but expected 3c4d".to_string(),
        };
        assert_eq!(err.user_message(), "is at 1a2b but expected 3c4d");
        assert_eq!(err.status(), Some(409));
    }
}
