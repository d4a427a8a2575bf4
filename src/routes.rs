//! The proxy's HTTP surface.
//!
//! Each route pulls the parameters it forwards out of the query string,
//! calls the matching [`Upstream`] method, and relays the result: remote
//! JSON verbatim on success, `{error, status}` with the remote's status on
//! failure. Defaults mirror the public contract: `rover=curiosity`,
//! `page=1`, `q=space`, `media_type=image`.

use std::future::Future;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use http::StatusCode;
use serde_json::{Value, json};

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::upstream::{Upstream, UpstreamResult};

/// Builds the full proxy router over a shared [`Upstream`].
pub fn router(upstream: Arc<Upstream>) -> Router {
    Router::new()
        .get("/api/apod", route(Arc::clone(&upstream), apod))
        .get("/api/mars-photos", route(Arc::clone(&upstream), mars_photos))
        .get("/api/mars-manifests", route(Arc::clone(&upstream), mars_manifests))
        .get("/api/neo", route(Arc::clone(&upstream), neo))
        .get("/api/images", route(Arc::clone(&upstream), images))
        .get("/api/epic", route(upstream, epic))
        .get("/api/health", health)
}

/// Adapts a `(Arc<Upstream>, Request)` handler into the router's
/// `Fn(Request)` shape by capturing the shared state.
fn route<F, Fut>(upstream: Arc<Upstream>, f: F) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<Upstream>, Request) -> Fut + Send + Sync + Copy + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    move |req| f(Arc::clone(&upstream), req)
}

async fn apod(up: Arc<Upstream>, req: Request) -> Response {
    reply(
        up.apod(
            req.query("date"),
            req.query("start_date"),
            req.query("end_date"),
            req.query("count"),
        )
        .await,
    )
}

async fn mars_photos(up: Arc<Upstream>, req: Request) -> Response {
    let rover = req.query("rover").unwrap_or("curiosity");
    let page = req.query("page").unwrap_or("1");
    reply(
        up.mars_photos(
            rover,
            req.query("sol"),
            req.query("earth_date"),
            req.query("camera"),
            page,
        )
        .await,
    )
}

async fn mars_manifests(up: Arc<Upstream>, _req: Request) -> Response {
    reply(up.mars_manifest().await)
}

async fn neo(up: Arc<Upstream>, req: Request) -> Response {
    reply(
        up.neo_feed(req.query("start_date"), req.query("end_date"))
            .await,
    )
}

async fn images(up: Arc<Upstream>, req: Request) -> Response {
    // An empty q falls back exactly like a missing one.
    let q = req.query("q").filter(|q| !q.is_empty()).unwrap_or("space");
    let media_type = req.query("media_type").unwrap_or("image");
    let page = req.query("page").unwrap_or("1");
    reply(up.image_search(q, media_type, page).await)
}

async fn epic(up: Arc<Upstream>, req: Request) -> Response {
    reply(up.epic(req.query("date")).await)
}

async fn health(_req: Request) -> Response {
    let body = json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    Response::json(json_body(&body))
}

fn reply(result: UpstreamResult) -> Response {
    match result {
        Ok(body) => Response::json(json_body(&body)),
        Err(err) => {
            let status = StatusCode::from_u16(err.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Response::builder().status(status).json(json_body(&err.body()))
        }
    }
}

/// A `Value` always serializes; an empty body is the harmless fallback.
fn json_body(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}
