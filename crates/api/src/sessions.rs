//! In-process session registry.
//!
//! The browser identifies its session with an `x-session-id` UUID header.
//! Contexts are created empty on first use, are private to their session
//! id, and are never persisted -- restarting the server forgets them all.

use std::collections::HashMap;

use axum::http::HeaderMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use sitepulse_core::session::SessionContext;

use crate::error::AppError;

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Default)]
pub struct SessionRegistry {
    inner: Mutex<HashMap<Uuid, SessionContext>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clone of the session's context, or an empty context for an
    /// unknown (or absent) session. Reads never allocate registry entries.
    pub async fn snapshot(&self, id: Option<Uuid>) -> SessionContext {
        match id {
            Some(id) => self
                .inner
                .lock()
                .await
                .get(&id)
                .cloned()
                .unwrap_or_default(),
            None => SessionContext::default(),
        }
    }

    /// Run `f` against the session's context, creating it empty first if
    /// this is the session's first write.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        let mut sessions = self.inner.lock().await;
        f(sessions.entry(id).or_default())
    }
}

/// Extract the optional session id. Present-but-malformed is a client
/// error, not an anonymous session.
pub fn session_id(headers: &HeaderMap) -> Result<Option<Uuid>, AppError> {
    let Some(value) = headers.get(SESSION_HEADER) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("{SESSION_HEADER} is not valid text")))?;
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("{SESSION_HEADER} must be a UUID")))
}

/// Extract a required session id; write-side session endpoints cannot work
/// without one.
pub fn require_session_id(headers: &HeaderMap) -> Result<Uuid, AppError> {
    session_id(headers)?.ok_or_else(|| {
        AppError::BadRequest(format!("{SESSION_HEADER} header is required"))
    })
}
