pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::form::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form sessions
        .route("/api/v1/forms", post(handlers::handle_create_form))
        .route(
            "/api/v1/forms/:id",
            get(handlers::handle_get_form).delete(handlers::handle_delete_form),
        )
        .route("/api/v1/forms/:id/events", post(handlers::handle_event))
        .route("/api/v1/forms/:id/export", post(handlers::handle_export))
        .with_state(state)
}
