mod auth;
mod billing;
mod builder;
mod chat;
mod config;
mod entitlement;
mod errors;
mod gate;
mod llm_client;
mod models;
mod plans;
mod render;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::session::SessionManager;
use crate::billing::SimulatedCheckout;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::LatexExporter;
use crate::routes::build_router;
use crate::state::{AppCore, AppState};
use crate::storage::{JsonFileStore, KeyValueStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResuAI API v{}", env!("CARGO_PKG_VERSION"));

    // Open the local store and restore any persisted session
    let kv: Arc<dyn KeyValueStore> =
        Arc::new(JsonFileStore::open(config.data_dir.join("resuai.json"))?);
    let sessions = SessionManager::restore(Arc::clone(&kv))?;

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone());
    info!(
        "LLM client initialized (search model: {})",
        llm_client::SEARCH_MODEL
    );

    // Simulated payment confirmation — swap behind CheckoutGateway for a real processor
    let checkout = Arc::new(SimulatedCheckout::new(Duration::from_millis(
        config.checkout_delay_ms,
    )));

    // Build app state
    let state = AppState {
        core: Arc::new(Mutex::new(AppCore::new(sessions))),
        llm,
        checkout,
        exporter: Arc::new(LatexExporter),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
