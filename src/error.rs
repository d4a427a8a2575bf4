//! Error taxonomy.
//!
//! Two worlds, two types. [`ApiError`] is what the explorer's client layer
//! surfaces to a section controller: the proxy (or NASA behind it) answered
//! with a failure, or the proxy could not be reached at all. [`ServeError`]
//! covers infrastructure failures of the proxy process itself: binding a
//! port, accepting a connection. Application-level failures on the proxy
//! side (a 404, an upstream 500) are expressed as HTTP responses, never as
//! `ServeError`s.

use thiserror::Error;

/// The fixed user-facing message for a client that cannot reach the proxy.
/// Distinct from any remote-side error so the UI can tell the user to check
/// the backend rather than their query.
pub const CONNECT_HINT: &str =
    "Unable to connect to NASA API server. Please ensure the backend is running.";

/// Failure of a single client request. Scoped to that request; nothing here
/// is fatal to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The proxy answered with a non-2xx status. The message is the
    /// proxy-provided `error` field when present, else `HTTP <status> <reason>`.
    #[error("{message}")]
    Remote {
        /// HTTP status the proxy returned.
        status: u16,
        /// Human-readable message for the UI.
        message: String,
    },

    /// The transport failed before any response arrived (refused connection,
    /// DNS failure, timeout).
    #[error("{0}")]
    Connectivity(String),

    /// The response was 2xx but its body was not the JSON we expected.
    #[error("invalid JSON in response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message a section controller stores and renders.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Infrastructure failure while running the proxy server.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
