//! Axum route handlers for the form API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::controller::{EventEffect, FormView, UserEvent};
use crate::form::session::SessionSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view: FormView,
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.id,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            view: snapshot.view,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub effect: EventEffect,
    pub view: FormView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/forms
pub async fn handle_create_form(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let snapshot = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(snapshot.into())))
}

/// GET /api/v1/forms/:id
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.sessions.snapshot(id).await?;
    Ok(Json(snapshot.into()))
}

/// DELETE /api/v1/forms/:id
pub async fn handle_delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/forms/:id/events
///
/// Applies one user event. A rejected submission answers 422 and names the
/// field to focus; the form itself is unchanged. Malformed bodies get the
/// same error envelope as every other failure.
pub async fn handle_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UserEvent>, JsonRejection>,
) -> Result<Json<EventResponse>, AppError> {
    let Json(event) = payload?;
    let applied = state.sessions.apply(id, event).await?;
    let effect = applied.outcome?;
    Ok(Json(EventResponse {
        effect,
        view: applied.view,
    }))
}

/// POST /api/v1/forms/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let form = state.sessions.form_snapshot(id).await?;
    let artifact = state.exporter.export(&form).await?;
    info!(
        "Exported form {id} via {} ({} bytes)",
        state.exporter.backend(),
        artifact.body.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.body,
    )
        .into_response())
}
