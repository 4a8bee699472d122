mod coach;
mod config;
mod errors;
mod generation;
mod llm_client;
mod resume;
mod routes;
mod session;
mod state;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::extractor::PdfExtractor;
use crate::routes::build_router;
use crate::session::store::SessionStore;
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

    info!("Starting Resume Genie API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client (single instance shared by every session)
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url);
    info!(
        "Completion client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.openai_base_url
    );

    let extractor = PdfExtractor::new(config.resume_temp_dir.clone());
    if let Some(dir) = &config.resume_temp_dir {
        info!("Staging resume PDFs in {}", dir.display());
    }

    let sessions = SessionStore::new(config.session_idle_ttl);
    sessions.start_sweeper();

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        extractor,
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
