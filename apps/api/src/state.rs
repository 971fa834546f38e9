use std::sync::Arc;

use crate::config::Config;
use crate::form::export::Exporter;
use crate::form::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub config: Config,
    /// Pluggable exporter. Default: UnavailableExporter. Swap via EXPORT_FORMAT env.
    pub exporter: Arc<dyn Exporter>,
}
