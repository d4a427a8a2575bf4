//! The proxy's client for the NASA Open APIs.
//!
//! One method per upstream endpoint. Every call against `api.nasa.gov` gets
//! the configured `api_key`; the Image and Video Library lives on its own
//! host and takes no key. Bodies pass through as [`serde_json::Value`]:
//! the proxy relays, it does not validate.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::warn;

use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Outcome of one upstream call: the remote's JSON on success, a
/// client-safe error otherwise.
pub type UpstreamResult = Result<Value, UpstreamError>;

/// What the proxy tells its caller when NASA did not answer 2xx.
///
/// The original error detail stays server-side; the client sees only the
/// remote's own message (when it sent one) or a generic label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// NASA answered with a non-2xx status.
    Status { status: u16, message: String },
    /// The call to NASA never produced a response.
    Network,
}

impl UpstreamError {
    /// HTTP status the proxy should respond with.
    pub fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Network => 500,
        }
    }

    /// `{error, status}` body the proxy responds with.
    pub fn body(&self) -> Value {
        let message = match self {
            Self::Status { message, .. } => message.as_str(),
            Self::Network => "Network error occurred",
        };
        json!({ "error": message, "status": self.status() })
    }
}

/// Shared client for all upstream NASA calls.
pub struct Upstream {
    http: Client,
    api_key: String,
    nasa_base: String,
    images_base: String,
}

impl Upstream {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_key: config.api_key.clone(),
            nasa_base: config.nasa_base_url.clone(),
            images_base: config.images_base_url.clone(),
        }
    }

    /// Astronomy Picture of the Day.
    pub async fn apod(
        &self,
        date: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        count: Option<&str>,
    ) -> UpstreamResult {
        let mut query = self.keyed();
        push_opt(&mut query, "date", date);
        push_opt(&mut query, "start_date", start_date);
        push_opt(&mut query, "end_date", end_date);
        push_opt(&mut query, "count", count);
        self.forward(&format!("{}/planetary/apod", self.nasa_base), &query)
            .await
    }

    /// Mars Rover Photos. The rover is a path segment upstream, not a query
    /// parameter.
    pub async fn mars_photos(
        &self,
        rover: &str,
        sol: Option<&str>,
        earth_date: Option<&str>,
        camera: Option<&str>,
        page: &str,
    ) -> UpstreamResult {
        let mut query = self.keyed();
        query.push(("page", page.to_owned()));
        push_opt(&mut query, "sol", sol);
        push_opt(&mut query, "earth_date", earth_date);
        push_opt(&mut query, "camera", camera);
        let url = format!(
            "{}/mars-photos/api/v1/rovers/{rover}/photos",
            self.nasa_base
        );
        self.forward(&url, &query).await
    }

    /// Mission manifest, hardcoded to Curiosity.
    pub async fn mars_manifest(&self) -> UpstreamResult {
        let url = format!("{}/mars-photos/api/v1/manifests/curiosity", self.nasa_base);
        self.forward(&url, &self.keyed()).await
    }

    /// Near Earth Object feed for a date range.
    pub async fn neo_feed(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> UpstreamResult {
        let mut query = self.keyed();
        push_opt(&mut query, "start_date", start_date);
        push_opt(&mut query, "end_date", end_date);
        self.forward(&format!("{}/neo/rest/v1/feed", self.nasa_base), &query)
            .await
    }

    /// Image and Video Library search. Different host, no API key.
    pub async fn image_search(&self, q: &str, media_type: &str, page: &str) -> UpstreamResult {
        let query = vec![
            ("q", q.to_owned()),
            ("media_type", media_type.to_owned()),
            ("page", page.to_owned()),
        ];
        self.forward(&format!("{}/search", self.images_base), &query)
            .await
    }

    /// EPIC natural-color imagery, optionally for a specific date.
    pub async fn epic(&self, date: Option<&str>) -> UpstreamResult {
        let url = format!("{}/{}", self.nasa_base, epic_path(date));
        self.forward(&url, &self.keyed()).await
    }

    fn keyed(&self) -> Vec<(&'static str, String)> {
        vec![("api_key", self.api_key.clone())]
    }

    async fn forward(&self, url: &str, query: &[(&'static str, String)]) -> UpstreamResult {
        let res = self
            .http
            .get(url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                warn!(url, "upstream transport failure: {e}");
                UpstreamError::Network
            })?;

        let status = res.status();
        if status.is_success() {
            res.json().await.map_err(|e| {
                warn!(url, "upstream sent undecodable body: {e}");
                UpstreamError::Network
            })
        } else {
            let body: Value = res.json().await.unwrap_or(Value::Null);
            Err(UpstreamError::Status {
                status: status.as_u16(),
                message: remote_message(&body),
            })
        }
    }
}

/// NASA error payloads nest the text under `error.message`; anything else
/// collapses to a generic label.
fn remote_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or("NASA API Error")
        .to_owned()
}

fn epic_path(date: Option<&str>) -> String {
    match date {
        Some(d) => format!("EPIC/api/natural/date/{d}"),
        None => "EPIC/api/natural".to_owned(),
    }
}

fn push_opt(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value {
        query.push((key, v.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_body_matches_the_contract() {
        let err = UpstreamError::Network;
        assert_eq!(err.status(), 500);
        assert_eq!(
            err.body(),
            json!({"error": "Network error occurred", "status": 500})
        );
    }

    #[test]
    fn status_error_carries_remote_status() {
        let err = UpstreamError::Status { status: 429, message: "OVER_RATE_LIMIT".into() };
        assert_eq!(err.status(), 429);
        assert_eq!(err.body()["status"], 429);
        assert_eq!(err.body()["error"], "OVER_RATE_LIMIT");
    }

    #[test]
    fn remote_message_reads_nested_error() {
        let body = json!({"error": {"code": "BAD_REQUEST", "message": "Date out of range"}});
        assert_eq!(remote_message(&body), "Date out of range");
        assert_eq!(remote_message(&Value::Null), "NASA API Error");
        assert_eq!(remote_message(&json!({"error": "flat"})), "NASA API Error");
    }

    #[test]
    fn epic_path_selects_by_date() {
        assert_eq!(epic_path(None), "EPIC/api/natural");
        assert_eq!(
            epic_path(Some("2024-01-05")),
            "EPIC/api/natural/date/2024-01-05"
        );
    }
}
