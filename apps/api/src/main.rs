mod analysis;
mod careers;
mod chat;
mod config;
mod documents;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod salary;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::careers::catalog::load_catalog;
use crate::careers::embedding::GeminiEmbedder;
use crate::careers::matcher::CareerMatcher;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::salary::SalaryClient;
use crate::skills::dictionary::KeywordMatcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Recommender API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (primary → fallback)
    let llm = LlmClient::gemini(
        &config.google_api_key,
        &config.primary_model,
        &config.fallback_model,
    );
    info!("LLM client initialized (models: {:?})", llm.models());

    // Load the career catalog; its embeddings are computed on first use
    let catalog = load_catalog(&config.career_catalog_path)
        .with_context(|| format!("Failed to load career catalog from {}", config.career_catalog_path))?;
    let embedder = GeminiEmbedder::new(config.google_api_key.clone(), config.embedding_model.clone());
    let careers = CareerMatcher::new(catalog, Arc::new(embedder));
    info!(
        "Career catalog loaded: {} entries (embedding model: {})",
        careers.catalog_len(),
        config.embedding_model
    );

    let salary = SalaryClient::new(config.serpapi_key.clone(), config.salary_location.clone());
    let keywords = Arc::new(KeywordMatcher::new()?);

    // Build app state
    let state = AppState {
        llm,
        careers,
        salary,
        keywords,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
