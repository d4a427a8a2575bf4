//! Process configuration from the environment.

use std::env;

/// The shared, heavily rate-limited key NASA hands out for experiments.
pub const DEMO_KEY: &str = "DEMO_KEY";

const NASA_BASE_URL: &str = "https://api.nasa.gov";
const IMAGES_BASE_URL: &str = "https://images-api.nasa.gov";

/// Proxy configuration.
///
/// Everything comes from environment variables with working defaults, so a
/// bare `orrery` starts against the real NASA services on the demo key:
///
/// | Variable | Default |
/// |---|---|
/// | `PORT` | `5000` |
/// | `NASA_API_KEY` | `DEMO_KEY` |
/// | `NASA_BASE_URL` | `https://api.nasa.gov` |
/// | `NASA_IMAGES_BASE_URL` | `https://images-api.nasa.gov` |
///
/// The base-URL overrides exist for tests, which point them at a local fake.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the proxy listens on.
    pub port: u16,
    /// NASA Open APIs key attached to every upstream call.
    pub api_key: String,
    /// Base URL for api.nasa.gov endpoints.
    pub nasa_base_url: String,
    /// Base URL for the Image and Video Library (separate host, no key).
    pub images_base_url: String,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        Self {
            port,
            api_key: env::var("NASA_API_KEY").unwrap_or_else(|_| DEMO_KEY.to_owned()),
            nasa_base_url: env::var("NASA_BASE_URL")
                .unwrap_or_else(|_| NASA_BASE_URL.to_owned()),
            images_base_url: env::var("NASA_IMAGES_BASE_URL")
                .unwrap_or_else(|_| IMAGES_BASE_URL.to_owned()),
        }
    }

    /// `host:port` string for [`Server::bind`](crate::Server::bind).
    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// True when running on the shared demo key.
    pub fn is_demo_key(&self) -> bool {
        self.api_key == DEMO_KEY
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            api_key: DEMO_KEY.to_owned(),
            nasa_base_url: NASA_BASE_URL.to_owned(),
            images_base_url: IMAGES_BASE_URL.to_owned(),
        }
    }
}
