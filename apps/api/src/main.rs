mod advice;
mod config;
mod errors;
mod ingest;
mod jobs;
mod llm;
mod repair;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
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

    info!("Starting JobLess API v{}", env!("CARGO_PKG_VERSION"));
    for provider in [
        llm::ProviderKind::Gemini,
        llm::ProviderKind::Groq,
        llm::ProviderKind::Cohere,
    ] {
        info!(
            "Provider {}: fallback key {}",
            provider.as_str(),
            if config.fallback_key(provider).is_some() {
                "configured (free tier enabled)"
            } else {
                "absent (sessions must bring their own)"
            }
        );
    }

    let state = AppState::new(config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
