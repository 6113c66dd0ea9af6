//! REST API surface consumed by the chat client.
//!
//! DESIGN
//! ======
//! The controller talks to the backend only through the [`ChatApi`] trait so
//! tests can inject a fake. The browser implementation lives in
//! [`super::http`]. Everything here is plain Rust and builds natively.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are classified once, in [`error_from_response`]: `401`
//! becomes [`ApiError::Unauthorized`] so callers can expire the session, and
//! other statuses keep the backend's `{"error": ...}` message when present.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{Contact, ContactId, ErrorBody, Message};

/// Errors from a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("session is not authenticated")]
    Unauthorized,
    #[error("server returned {status}{}", detail_suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("http client is only available in the browser")]
    Unavailable,
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Backend operations the chat controller depends on.
#[async_trait(?Send)]
pub trait ChatApi {
    /// `GET /logout`. Any completed response counts as success.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /api/users`.
    async fn contacts(&self) -> Result<Vec<Contact>, ApiError>;

    /// `GET /api/messages/{contact_id}`.
    async fn messages(&self, contact_id: &ContactId) -> Result<Vec<Message>, ApiError>;

    /// `POST /api/messages/{contact_id}` with `{"content": ...}`.
    async fn send_message(&self, contact_id: &ContactId, content: &str) -> Result<(), ApiError>;
}

/// Builds backend URLs from the configured base and logout path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    logout_path: String,
}

impl Endpoints {
    pub fn new(base: &str, logout_path: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
            logout_path: logout_path.to_owned(),
        }
    }

    pub fn logout(&self) -> String {
        format!("{}{}", self.base, self.logout_path)
    }

    pub fn users(&self) -> String {
        format!("{}/api/users", self.base)
    }

    pub fn messages(&self, contact_id: &ContactId) -> String {
        format!("{}/api/messages/{contact_id}", self.base)
    }
}

/// Map a non-2xx status and its body text to an [`ApiError`].
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let message = serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error);
    ApiError::Status { status, message }
}
