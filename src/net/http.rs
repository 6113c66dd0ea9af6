//! Browser implementation of [`ChatApi`] over `fetch`.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, sending same-origin
//! credentials so the backend's session cookie rides along.
//! Native builds: every call returns [`ApiError::Unavailable`] since these
//! endpoints are only reachable from the page.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use super::api::{ApiError, ChatApi, Endpoints};
use super::types::{Contact, ContactId, Message};
use crate::config::ClientConfig;

/// [`ChatApi`] backed by the page's `fetch`.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    endpoints: Endpoints,
}

impl HttpChatApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoints: Endpoints::new(&config.api_base, &config.logout_path),
        }
    }
}

#[async_trait(?Send)]
impl ChatApi for HttpChatApi {
    async fn logout(&self) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            browser::get(&self.endpoints.logout()).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &self.endpoints;
            Err(ApiError::Unavailable)
        }
    }

    async fn contacts(&self) -> Result<Vec<Contact>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = browser::get(&self.endpoints.users()).await?;
            browser::decode(browser::ensure_ok(resp).await?).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn messages(&self, contact_id: &ContactId) -> Result<Vec<Message>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = browser::get(&self.endpoints.messages(contact_id)).await?;
            browser::decode(browser::ensure_ok(resp).await?).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = contact_id;
            Err(ApiError::Unavailable)
        }
    }

    async fn send_message(&self, contact_id: &ContactId, content: &str) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let body = super::types::OutgoingMessage {
                content: content.to_owned(),
            };
            let url = self.endpoints.messages(contact_id);
            let resp = browser::post_json(&url, &body).await?;
            browser::ensure_ok(resp).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (contact_id, content);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
mod browser {
    use gloo_net::http::{Request, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use web_sys::RequestCredentials;

    use crate::net::api::{ApiError, error_from_response};

    fn network(e: gloo_net::Error) -> ApiError {
        ApiError::Network(e.to_string())
    }

    pub(super) async fn get(url: &str) -> Result<Response, ApiError> {
        Request::get(url)
            .credentials(RequestCredentials::SameOrigin)
            .send()
            .await
            .map_err(network)
    }

    pub(super) async fn post_json<T: Serialize>(url: &str, body: &T) -> Result<Response, ApiError> {
        Request::post(url)
            .credentials(RequestCredentials::SameOrigin)
            .json(body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)
    }

    pub(super) async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    pub(super) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
