//! Parley ask service
//!
//! Answers `POST /ask` with a local model, adding web search context for
//! prompts that ask about recent events.

use parley::api::{create_router, AppState};
use parley::config::ServerConfig;
use parley::model::OllamaRunner;
use parley::responder::Responder;
use parley::search::build_search;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional .env for local development
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServerConfig::from_env()?;

    let search = build_search(&config.search)?;
    match &search {
        Some(provider) => tracing::info!(provider = provider.name(), "Web search enabled"),
        None => tracing::warn!("Web search disabled. Set SEARCH_PROVIDER to tavily or brave."),
    }

    let model = Arc::new(OllamaRunner::new(&config.ollama_bin, &config.model));
    tracing::info!(model = %config.model, bin = %config.ollama_bin, "Model runner configured");

    let state = AppState::new(Responder::new(search, model));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Parley ask service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
