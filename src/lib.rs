//! # orrery
//!
//! A NASA Open APIs explorer, split the way the deployment is split.
//!
//! ## The contract
//!
//! NASA's services own the data, the rate limits, and the API key scheme.
//! orrery does not, by design. One side of this crate is a **proxy** that
//! holds the key and forwards query parameters verbatim; the other side is
//! the **client layer** a UI sits on: per-section query state, pagination
//! cursors, result accumulators, and the NEO aggregation that turns a
//! date-keyed feed into one sorted list with summary statistics.
//!
//! What the proxy does:
//!
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - Async I/O — tokio + hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown — SIGTERM / Ctrl-C, drains in-flight requests
//! - Error mapping — remote failures become `{error, status}`, transport
//!   failures become a generic 500; internal detail never leaks
//!
//! What the client layer guarantees:
//!
//! - A stale response can never overwrite a newer query's results: every
//!   fetch carries a [`FetchTicket`](section::FetchTicket) and resolutions
//!   for superseded tickets are discarded
//! - Load-more appends; a new search replaces; a failed load-more keeps
//!   what is already on screen
//!
//! ## Running the proxy
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use orrery::{Config, Server, Upstream, routes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env();
//!     let upstream = Arc::new(Upstream::new(&config));
//!     Server::bind(&config.addr())
//!         .serve(routes::router(upstream))
//!         .await
//!         .expect("server error");
//! }
//! ```
//!
//! ## Driving a section
//!
//! ```rust,no_run
//! use orrery::{ApiClient, section::NeoController};
//!
//! # async fn demo() {
//! let client = ApiClient::new("http://localhost:5000/api");
//! let mut neo = NeoController::new();
//! neo.refresh(&client).await;
//! for object in neo.objects() {
//!     println!("{}: {:.2} km", object.name, object.max_diameter_km());
//! }
//! # }
//! ```

mod client;
mod config;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod upstream;

pub mod date;
pub mod explorer;
pub mod models;
pub mod neo;
pub mod routes;
pub mod section;

pub use client::{ApiClient, Fetch, Param};
pub use config::{Config, DEMO_KEY};
pub use error::{ApiError, CONNECT_HINT, ServeError};
pub use explorer::{Explorer, Section};
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use upstream::{Upstream, UpstreamError};
