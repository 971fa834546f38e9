//! In-memory form sessions. Nothing here outlives the process.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::controller::{EventEffect, FormController, FormView, UserEvent};
use crate::form::validators::ValidationFailure;
use crate::models::form::FormState;

#[derive(Debug)]
pub struct FormSession {
    pub controller: FormController,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Monotonic time of the last create or event; drives idle expiry.
    last_active: Instant,
}

/// A session's derived view plus its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view: FormView,
}

impl FormSession {
    fn snapshot(&self, id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            view: self.controller.view(),
        }
    }
}

/// Result of applying one event to a session.
pub struct Applied {
    pub outcome: Result<EventEffect, ValidationFailure>,
    pub view: FormView,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, FormSession>>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity,
            idle_ttl,
        }
    }

    /// Opens a new session. Sessions idle for longer than the TTL are evicted
    /// first, so abandoned forms never hold slots forever.
    pub async fn create(&self) -> Result<SessionSnapshot, AppError> {
        let mut sessions = self.sessions.write().await;
        evict_idle(&mut sessions, self.idle_ttl);
        if sessions.len() >= self.capacity {
            return Err(AppError::SessionLimit(self.capacity));
        }
        let id = Uuid::new_v4();
        let now = Utc::now();
        let session = FormSession {
            controller: FormController::new(),
            created_at: now,
            updated_at: now,
            last_active: Instant::now(),
        };
        let snapshot = session.snapshot(id);
        sessions.insert(id, session);
        info!("Created form session {id} ({} active)", sessions.len());
        Ok(snapshot)
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.snapshot(id))
            .ok_or_else(|| not_found(id))
    }

    pub async fn form_snapshot(&self, id: Uuid) -> Result<FormState, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.controller.form().clone())
            .ok_or_else(|| not_found(id))
    }

    /// Runs one event to completion while holding the write lock, so no other
    /// event can observe a half-applied form.
    pub async fn apply(&self, id: Uuid, event: UserEvent) -> Result<Applied, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        let outcome = session.controller.dispatch(event);
        session.updated_at = Utc::now();
        session.last_active = Instant::now();
        Ok(Applied {
            outcome,
            view: session.controller.view(),
        })
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.remove(&id).ok_or_else(|| not_found(id))?;
        info!(
            "Closed form session {id} after {}s",
            (Utc::now() - session.created_at).num_seconds()
        );
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, FormSession>, idle_ttl: Duration) {
    let before = sessions.len();
    sessions.retain(|_, s| s.last_active.elapsed() <= idle_ttl);
    let evicted = before - sessions.len();
    if evicted > 0 {
        info!("Evicted {evicted} idle form sessions");
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Form session {id} not found"))
}
