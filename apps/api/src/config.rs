use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::github::DEFAULT_API_URL;
use crate::settings::PublishSettings;

const DEFAULT_OWNER: &str = "ptetest135-byte";
const DEFAULT_REPO: &str = "ptetest135-byte.github.io";
const DEFAULT_FILE_PATH: &str = "src/data/resumeData.ts";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub admin_password: String,
    pub port: u16,
    pub rust_log: String,
    pub settings_path: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub github_api_url: String,
    /// Used when no settings file has been saved yet.
    pub default_settings: PublishSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            admin_password: require_env("FOLIO_ADMIN_PASSWORD")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            settings_path: PathBuf::from(env_or("FOLIO_SETTINGS_PATH", "folio-settings.json")),
            seed_path: std::env::var("FOLIO_SEED_PATH").ok().map(PathBuf::from),
            github_api_url: env_or("GITHUB_API_URL", DEFAULT_API_URL),
            default_settings: PublishSettings {
                token: env_or("GITHUB_TOKEN", ""),
                owner: env_or("GITHUB_OWNER", DEFAULT_OWNER),
                repo: env_or("GITHUB_REPO", DEFAULT_REPO),
                file_path: env_or("GITHUB_FILE_PATH", DEFAULT_FILE_PATH),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
