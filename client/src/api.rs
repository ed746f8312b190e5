//! Authenticated API client
//!
//! Every request reads the session store at send time: the bearer token is
//! attached when one is present and the base URL is the resolved tenant
//! endpoint, falling back to the configured default.

use crate::{config::ClientConfig, error::ApiError, session::SessionStore};
use reqwest::{Client, Method, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;

/// Authenticated client for the ticketing backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    session: SessionStore,
    default_base_url: String,
}

impl ApiClient {
    /// Create a client from configuration and a shared session store
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            session,
            default_base_url: config.api_url.clone(),
        })
    }

    /// Session store this client reads from
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Base URL the next request will use
    pub async fn base_url(&self) -> String {
        self.session
            .endpoint()
            .await
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or_else(|| self.default_base_url.clone())
    }

    /// Start a request against the current base URL
    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let base = self.base_url().await;
        let url = format!("{}{path}", base.trim_end_matches('/'));

        let builder = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a success body into `T`
    ///
    /// An empty success body decodes as `{}`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };

        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<serde_json::Value>(&text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        tracing::debug!(status = status.as_u16(), ?message, "Request rejected");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
            body,
        })
    }
}
