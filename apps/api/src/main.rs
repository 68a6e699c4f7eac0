mod config;
mod enhancement;
mod errors;
mod export;
mod llm_client;
mod models;
mod parser;
mod routes;
mod scoring;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enhancement::Enhancer;
use crate::export::pdf::{LatexRenderer, PdfRenderer};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::AtsScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; enhancement stays off without a key
    let enhancer = match &config.gemini_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone());
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Enhancer::new(Arc::new(llm)))
        }
        None => {
            warn!("GEMINI_API_KEY not set; AI enhancement endpoints are disabled");
            None
        }
    };

    // Probe the LaTeX toolchain once; PDF export is skipped when it is missing
    let renderer = LatexRenderer::new(config.latex_program.clone(), config.render_timeout);
    let pdf_available = renderer.is_available().await;

    let state = AppState {
        config: config.clone(),
        scorer: Arc::new(AtsScorer::new()),
        enhancer,
        renderer: Arc::new(renderer),
        pdf_available,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
