//! Uniform request/response handling against the Devnors REST backend.
//!
//! Every request attaches `Authorization: Bearer <token>` when a token is
//! present in the shared session store at call time. Non-2xx responses
//! become `ClientError::Api` carrying the server `detail` message when one
//! exists. There is no retry, no backoff, and no request deduplication;
//! every failure is terminal for that call.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ClientError;
use crate::session::store::SessionStore;

pub mod auth;
pub mod resources;

/// All resource endpoints live under this prefix. `/health` does not.
pub const API_PREFIX: &str = "/api/v1";
const HEALTH_ENDPOINT: &str = "/health";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub(crate) fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Builds a request for `path` (relative to the API prefix), attaching
    /// the bearer token iff one is stored right now. Logout between two
    /// calls simply means the next request goes out unauthenticated.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.session.access_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(ClientError::Api {
                status,
                message: extract_error_message(status, &text),
            });
        }

        decode_body(&text)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    /// Boolean liveness probe against the root `/health` endpoint.
    /// Any 2xx is "available"; any transport error or non-2xx is not.
    /// The response body is ignored.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health probe failed: {e}");
                false
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Best-effort human-readable message for a non-2xx response: the server's
/// `detail` field when the body parses, a generic status message otherwise.
fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| format!("HTTP {status} error"))
}

/// Deserializes a 2xx body, treating an empty body as the empty object.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ClientError> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(ClientError::Parse)
}
