//! StyleHub API client.
//!
//! # Architecture
//!
//! - The API is the source of truth - no local sync, direct calls
//! - One [`ApiClient`] per process, cloned freely (shared `Arc` inner)
//! - The session store is injected at construction; its bearer token is
//!   attached verbatim to every request while someone is logged in
//! - Catalog reads are cached in-memory via `moka`; cart reads never are
//!
//! # Failure policy
//!
//! Each operation is exactly one attempt: no retry, no backoff, no
//! deduplication. All failures collapse into [`ApiError`] for a uniform
//! user-facing notification.
//!
//! # Cancellation
//!
//! Every operation is a plain future; dropping it abandons the underlying
//! request. Nothing here spawns detached tasks, so an abandoned view cannot
//! leave work running.
//!
//! # Example
//!
//! ```rust,ignore
//! use stylehub_client::api::ApiClient;
//!
//! let client = ApiClient::new(&config, session.clone());
//!
//! let products = client.products().await?;
//! let detail = client.product_detail(&products[0].id).await?;
//! ```

mod auth;
mod cache;
mod cart;
mod catalog;
mod orders;
mod seller;
pub mod types;

pub use auth::{AuthSession, Credentials, Registration};
pub use catalog::average_rating;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

use cache::{CacheKey, CacheValue};

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the StyleHub marketplace API.
///
/// The single egress point of the application: every outbound request goes
/// through [`ApiClient::execute`], which injects the session token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: url::Url,
    session: SessionStore,
    catalog_cache: Cache<CacheKey, CacheValue>,
}

impl ApiClient {
    /// Create a new API client bound to a session store.
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(config.catalog_cache_secs))
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                session,
                catalog_cache,
            }),
        }
    }

    /// The session store this client injects tokens from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Dispatch a request and decode the JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, body).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %truncate(&text),
                "Failed to parse StyleHub API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Dispatch a request where only the status matters (e.g., deletes).
    async fn execute_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body).await.map(|_| ())
    }

    /// Dispatch a request, returning the raw body of a success response.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        let mut request = self.inner.client.request(method.clone(), self.endpoint(path));

        // The stored token string is attached as-is - the API does not use a
        // `Bearer` prefix scheme.
        let identity = self.inner.session.current_identity();
        if let Some(token) = identity.token() {
            request = request.header(header::AUTHORIZATION, token);
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "Dispatching StyleHub API request");
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %truncate(&text),
                "StyleHub API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&text, status),
            });
        }

        Ok(text)
    }
}

/// Truncate a response body for log output.
fn truncate(text: &str) -> String {
    text.chars().take(500).collect()
}

/// Extract the API's `message` field from an error body, falling back to the
/// status line when the body carries none.
fn error_message(body: &str, status: StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_owned()
        },
        |parsed| parsed.message,
    )
}
