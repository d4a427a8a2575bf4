//! The orrery proxy binary.
//!
//! Run with:
//!   RUST_LOG=orrery=info cargo run
//!
//! Try:
//!   curl 'http://localhost:5000/api/apod?date=2024-01-05'
//!   curl 'http://localhost:5000/api/mars-photos?rover=curiosity&sol=1000'
//!   curl 'http://localhost:5000/api/health'

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use orrery::{Config, ServeError, Server, Upstream, routes};

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orrery=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    info!(port = config.port, "starting NASA explorer proxy");
    if config.is_demo_key() {
        info!("using NASA API key: DEMO_KEY (rate limited)");
    } else {
        info!("using NASA API key: custom key");
    }

    let upstream = Arc::new(Upstream::new(&config));
    Server::bind(&config.addr())
        .serve(routes::router(upstream))
        .await
}
