mod config;
mod errors;
mod evaluation;
mod ingest;
mod llm_client;
mod matching;
mod routes;
mod state;
mod summary;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::summary::{DisabledSummaryGenerator, LlmSummaryGenerator, SummaryGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matcher API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        threshold = config.match_threshold,
        clamp_experience_weight = config.clamp_experience_weight,
        "Matching defaults"
    );

    // Summaries are optional; without a key every request gets the placeholder
    let summarizer: Arc<dyn SummaryGenerator> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmSummaryGenerator(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; candidate summaries disabled");
            Arc::new(DisabledSummaryGenerator)
        }
    };

    let state = AppState {
        config: config.clone(),
        summarizer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
