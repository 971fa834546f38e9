mod config;
mod errors;
mod form;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ExportFormat};
use crate::form::export::{Exporter, MarkdownExporter, UnavailableExporter};
use crate::form::session::SessionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    let exporter: Arc<dyn Exporter> = match config.export_format {
        ExportFormat::None => Arc::new(UnavailableExporter),
        ExportFormat::Markdown => Arc::new(MarkdownExporter),
    };
    info!("Export backend: {}", exporter.backend());

    let sessions = SessionStore::new(config.max_form_sessions, config.form_session_ttl());
    info!(
        "Form session capacity: {} (idle TTL {}s)",
        config.max_form_sessions, config.form_session_ttl_secs
    );

    let state = AppState {
        sessions,
        config: config.clone(),
        exporter,
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
