//! Publish settings: the GitHub token and the target repository file.
//!
//! Persisted as a small JSON file next to the service so they survive
//! restarts. The token is never echoed back in full.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::github::RepoFile;

pub mod handlers;

#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishSettings {
    #[serde(default)]
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub file_path: String,
}

impl std::fmt::Debug for PublishSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishSettings")
            .field("token", &mask_token(&self.token))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("file_path", &self.file_path)
            .finish()
    }
}

impl PublishSettings {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn target(&self) -> RepoFile {
        RepoFile {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            path: self.file_path.clone(),
        }
    }

    pub fn view(&self) -> SettingsView {
        SettingsView {
            token_configured: self.has_token(),
            token_hint: self.has_token().then(|| mask_token(&self.token)),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            file_path: self.file_path.clone(),
        }
    }
}

/// What `GET /settings` returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub token_configured: bool,
    pub token_hint: Option<String>,
    pub owner: String,
    pub repo: String,
    pub file_path: String,
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

/// Settings plus the file they are persisted to.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    current: PublishSettings,
}

impl SettingsStore {
    /// Reads `path` if it exists, otherwise starts from `defaults`.
    pub fn load(path: PathBuf, defaults: PublishSettings) -> Result<Self> {
        let current = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            let mut saved: PublishSettings = serde_json::from_str(&text)
                .with_context(|| format!("Settings file {} is malformed", path.display()))?;
            if !saved.has_token() {
                saved.token = defaults.token;
            }
            info!("Loaded publish settings from {}", path.display());
            saved
        } else {
            info!(
                "No settings file at {}, using environment defaults",
                path.display()
            );
            defaults
        };
        Ok(Self { path, current })
    }

    pub fn current(&self) -> &PublishSettings {
        &self.current
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the settings and writes them to disk.
    pub async fn save(&mut self, settings: PublishSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(&settings)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write settings file {}", self.path.display()))?;
        self.current = settings;
        info!("Saved publish settings to {}", self.path.display());
        Ok(())
    }
}
