mod config;
mod content;
mod errors;
mod github;
mod models;
mod publish;
mod routes;
mod session;
mod settings;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::content::seed::load_seed;
use crate::content::store::ContentStore;
use crate::github::GithubClient;
use crate::publish::Publisher;
use crate::routes::build_router;
use crate::session::SessionGate;
use crate::settings::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Seed the content store
    let seed = load_seed(config.seed_path.as_deref())?;
    info!(
        "Content store ready: {} experience, {} education, {} certifications",
        seed.experience.len(),
        seed.education.len(),
        seed.certifications.completed.len() + seed.certifications.studying.len()
    );
    let store = ContentStore::new(seed);

    // Publish settings (file first, env defaults otherwise)
    let settings = SettingsStore::load(config.settings_path.clone(), config.default_settings.clone())?;
    info!(
        "Publish target: {:?} (settings file {})",
        settings.current(),
        settings.path().display()
    );

    // Hosting API client
    let github = GithubClient::new(config.github_api_url.clone())?;
    info!("GitHub client initialized ({})", config.github_api_url);

    // Build app state
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        settings: Arc::new(RwLock::new(settings)),
        sessions: Arc::new(SessionGate::new(config.admin_password.clone())),
        publisher: Arc::new(Publisher::new(Arc::new(github))),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the site's origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
