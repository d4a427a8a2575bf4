//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. Build it
//! once at startup, hand it to [`Server::serve`](crate::Server::serve).

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router. Each registration returns `self` so routes chain:
///
/// ```rust,no_run
/// # use orrery::{Request, Response, Router};
/// # async fn apod(_: Request) -> Response { Response::text("") }
/// # async fn health(_: Request) -> Response { Response::text("") }
/// let app = Router::new()
///     .get("/api/apod", apod)
///     .get("/api/health", health);
/// ```
pub struct Router {
    routes: HashMap<http::Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a GET handler. Path parameters use `{name}` syntax and are
    /// read back with [`Request::param`](crate::Request::param).
    ///
    /// # Panics
    ///
    /// Panics at startup on an invalid or conflicting route pattern.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.add(http::Method::GET, path, handler)
    }

    fn add(mut self, method: http::Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &http::Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
