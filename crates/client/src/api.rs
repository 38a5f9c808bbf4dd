//! REST adapter for the Daisy backend.
//!
//! Every backend call goes through [`ApiClient`]. The adapter owns the
//! uniform request/response contract:
//!
//! - a bearer token read from durable storage is attached when present,
//!   preferring the admin token over the customer token when both exist
//! - non-2xx responses become [`ApiError::Server`] carrying the backend's
//!   `message` field (or a generic fallback)
//! - transport faults become [`ApiError::Network`] with a generic,
//!   user-facing message
//!
//! Callers therefore never see a panic or a raw transport error; every
//! failure renders a message fit for a transient notification. No request
//! is ever retried.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::storage::{Storage, keys};

/// Errors produced by the REST adapter.
///
/// The `Display` form of every variant is the user-facing notification
/// text, so callers surface errors with `err.to_string()` and nothing else.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error. Please try again.")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Backend-provided message, or "Request failed" when absent.
        message: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("Network error. Please try again.")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a server-reported failure, if that is what this is.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Shape of backend error bodies: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    storage: Storage,
}

/// REST client for the Daisy backend.
///
/// Cheaply cloneable; all clones share one connection pool and one storage
/// handle.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Create a new client against the configured base URL.
    #[must_use]
    pub fn new(config: &ClientConfig, storage: Storage) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                storage,
            }),
        }
    }

    /// The bearer token to attach, if any session is present.
    ///
    /// The admin token wins over the customer token when both exist: the
    /// console and storefront share one storage namespace and the admin
    /// session is the more privileged intent.
    async fn bearer_token(&self) -> Option<String> {
        if let Some(token) = self.inner.storage.get(keys::ADMIN_TOKEN).await {
            return Some(token);
        }
        self.inner.storage.get(keys::TOKEN).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.inner.base_url)
    }

    /// Attach auth, send, and normalize the response into `T` or [`ApiError`].
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let text = self.execute_text(request).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Unexpected response body shape"
            );
            ApiError::Decode(e)
        })
    }

    /// Attach auth, send, and normalize the response into raw text.
    async fn execute_text(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let request = match self.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::Network)?;

        if status.is_success() {
            return Ok(text);
        }

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Request failed".to_owned());
        debug!(status = status.as_u16(), %message, "Backend reported failure");

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// GET an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.execute(self.inner.http.get(self.url(endpoint))).await
    }

    /// GET an endpoint with query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute(self.inner.http.get(self.url(endpoint)).query(query))
            .await
    }

    /// GET an endpoint returning a plain-text body (the CSV export).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    pub async fn get_text(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<String, ApiError> {
        self.execute_text(self.inner.http.get(self.url(endpoint)).query(query))
            .await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.http.post(self.url(endpoint)).json(body))
            .await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.http.put(self.url(endpoint)).json(body))
            .await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn patch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.http.patch(self.url(endpoint)).json(body))
            .await
    }

    /// DELETE an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.execute(self.inner.http.delete(self.url(endpoint)))
            .await
    }

    /// POST a multipart form.
    ///
    /// No Content-Type header is set here; reqwest supplies the multipart
    /// boundary. Setting one manually corrupts the upload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, form), fields(endpoint = %endpoint))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.http.post(self.url(endpoint)).multipart(form))
            .await
    }

    /// PUT a multipart form. Same Content-Type rule as [`Self::post_multipart`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, form), fields(endpoint = %endpoint))]
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.http.put(self.url(endpoint)).multipart(form))
            .await
    }
}
