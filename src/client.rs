//! The explorer-side API client.
//!
//! Mirrors what the browser does against the proxy: build a query string,
//! GET, parse JSON, and normalize every failure into [`ApiError`]. No
//! retries, no caching; every call is a fresh round trip with a 15 s
//! timeout.
//!
//! Section controllers talk to the network through the [`Fetch`] trait
//! rather than the concrete client, so tests can script responses and
//! resolve them out of order.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{ApiError, CONNECT_HINT};
use crate::models::{EpicImage, Health, ManifestResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A query parameter: name plus optional value. `None` and empty-string
/// values are omitted from the request entirely.
pub type Param = (&'static str, Option<String>);

/// The seam between section controllers and the network.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `endpoint` (e.g. `"/apod"`) with the given parameters, resolving
    /// to the parsed JSON body.
    async fn request(&self, endpoint: &str, params: &[Param]) -> Result<Value, ApiError>;
}

/// HTTP client for the proxy's `/api` surface.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the proxy's API root, e.g. `http://localhost:5000/api`.
    /// A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http: reqwest::Client::new(), base_url }
    }

    /// The full request URL for an endpoint: base, path, then every present
    /// non-empty parameter on the query string.
    pub fn build_url(&self, endpoint: &str, params: &[Param]) -> String {
        let mut url = format!("{}{endpoint}", self.base_url);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in params {
            if let Some(value) = value {
                if !value.is_empty() {
                    serializer.append_pair(key, value);
                    any = true;
                }
            }
        }
        if any {
            url.push('?');
            url.push_str(&serializer.finish());
        }
        url
    }

    async fn get_json(&self, endpoint: &str, params: &[Param]) -> Result<Value, ApiError> {
        let url = self.build_url(endpoint, params);

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|_| ApiError::Connectivity(CONNECT_HINT.to_owned()))?;

        let status = res.status();
        if !status.is_success() {
            // The proxy sends {error, status}; anything else falls back to
            // the bare status line.
            let body: Value = res.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("")
                    )
                    .trim_end()
                    .to_owned()
                });
            return Err(ApiError::Remote { status: status.as_u16(), message });
        }

        res.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ── Typed conveniences for endpoints without a section controller ────────

    /// EPIC natural-color frames, optionally for a specific date.
    pub async fn fetch_epic(&self, date: Option<&str>) -> Result<Vec<EpicImage>, ApiError> {
        let params = [("date", date.map(str::to_owned))];
        let value = self.request("/epic", &params).await?;
        decode(value)
    }

    /// The Curiosity mission manifest.
    pub async fn fetch_mars_manifest(&self) -> Result<ManifestResponse, ApiError> {
        let value = self.request("/mars-manifests", &[]).await?;
        decode(value)
    }

    /// Proxy liveness.
    pub async fn check_health(&self) -> Result<Health, ApiError> {
        let value = self.request("/health", &[]).await?;
        decode(value)
    }
}

#[async_trait]
impl Fetch for ApiClient {
    async fn request(&self, endpoint: &str, params: &[Param]) -> Result<Value, ApiError> {
        self.get_json(endpoint, params).await
    }
}

/// Typed view of an already-fetched payload.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
