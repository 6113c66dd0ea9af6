//! Resolving who the current session belongs to.
//!
//! The username is only needed for display and for classifying messages as
//! sent or received; authorization stays with the backend's cookie. The
//! resolution contract:
//!
//! 1. a non-empty cached username in session storage wins, with no request;
//! 2. otherwise `GET /api/users` probes the session:
//!    - `401` → [`SessionError::NotAuthenticated`]
//!    - other failure → [`SessionError::Probe`]
//!    - success + server-rendered page username → cache it and return it
//!    - success without one → [`SessionError::Unresolved`]

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::{ApiError, ChatApi};
use crate::util::storage::SessionStore;

/// The authenticated user's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    username: String,
}

impl SessionIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn into_username(self) -> String {
        self.username
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is not authenticated")]
    NotAuthenticated,
    #[error("session is valid but the page did not provide a username")]
    Unresolved,
    #[error("session probe failed: {0}")]
    Probe(#[source] ApiError),
}

/// Resolve the session identity, caching it under `key` once known.
///
/// # Errors
///
/// See the module docs for the failure contract.
pub async fn resolve_session_identity(
    store: &dyn SessionStore,
    api: &dyn ChatApi,
    key: &str,
    page_username: Option<&str>,
) -> Result<SessionIdentity, SessionError> {
    if let Some(cached) = store.get(key).filter(|name| !name.trim().is_empty()) {
        return Ok(SessionIdentity::new(cached));
    }

    match api.contacts().await {
        Ok(_) => {}
        Err(ApiError::Unauthorized) => return Err(SessionError::NotAuthenticated),
        Err(e) => return Err(SessionError::Probe(e)),
    }

    let username = page_username
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(SessionError::Unresolved)?;
    store.set(key, username);
    log::debug!("cached session username under {key}");
    Ok(SessionIdentity::new(username))
}
