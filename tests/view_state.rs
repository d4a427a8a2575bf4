//! Section state-machine properties, driven through the `Fetch` seam.
//!
//! A scripted fetcher hands back canned outcomes in order, which makes the
//! interleaving that matters (a slow first response landing after a faster
//! second one) easy to stage deterministically.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use orrery::section::{
    ApodController, IMAGES_PAGE_SIZE, ImageLibraryController, MarsPhotosController, Phase,
};
use orrery::{ApiError, Fetch, Param};

/// Replays a fixed sequence of outcomes, recording every request it sees.
struct ScriptedFetch {
    outcomes: Mutex<VecDeque<Result<Value, ApiError>>>,
    seen: Mutex<Vec<(String, Vec<(String, Option<String>)>)>>,
}

impl ScriptedFetch {
    fn new(outcomes: Vec<Result<Value, ApiError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(String, Vec<(String, Option<String>)>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for ScriptedFetch {
    async fn request(&self, endpoint: &str, params: &[Param]) -> Result<Value, ApiError> {
        self.seen.lock().unwrap().push((
            endpoint.to_owned(),
            params
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        ));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Connectivity("script exhausted".into())))
    }
}

fn items_json(count: usize, id_prefix: &str) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "data": [{
                    "nasa_id": format!("{id_prefix}{i}"),
                    "title": format!("Item {i}"),
                    "media_type": "image",
                }],
            })
        })
        .collect();
    json!({ "collection": { "items": items } })
}

fn apod_json(date: &str) -> Value {
    json!({
        "date": date,
        "title": "A Space Thing",
        "explanation": "canned",
        "media_type": "image",
        "url": "http://example/sd.jpg",
    })
}

// ── Staleness ─────────────────────────────────────────────────────────────────

#[test]
fn settled_state_reflects_only_the_latest_query() {
    let mut ctrl = ImageLibraryController::new();

    // Two queries go out; the older response arrives last.
    let stale = ctrl.set_query("jupiter");
    let current = ctrl.set_query("saturn");

    ctrl.resolve(&current, Ok(items_json(3, "saturn-")));
    ctrl.resolve(&stale, Ok(items_json(80, "jupiter-")));

    assert!(ctrl.phase().is_loaded());
    assert_eq!(ctrl.items().len(), 3);
    assert_eq!(ctrl.item_key(0).unwrap(), "saturn-0-0");
}

#[test]
fn stale_failure_cannot_knock_out_fresh_results() {
    let mut ctrl = ImageLibraryController::new();

    let stale = ctrl.set_query("jupiter");
    let current = ctrl.set_query("saturn");

    ctrl.resolve(&current, Ok(items_json(3, "saturn-")));
    ctrl.resolve(
        &stale,
        Err(ApiError::Remote { status: 500, message: "late and wrong".into() }),
    );

    assert!(ctrl.phase().is_loaded());
    assert_eq!(ctrl.items().len(), 3);
}

// ── Load-more pagination ──────────────────────────────────────────────────────

#[test]
fn full_then_short_page_settles_the_cursor_and_flag() {
    let mut ctrl = ImageLibraryController::new();

    let reset = ctrl.search();
    ctrl.resolve(&reset, Ok(items_json(IMAGES_PAGE_SIZE, "a")));
    assert!(ctrl.has_more());

    let more = ctrl.load_more().expect("a full page leaves more to load");
    assert_eq!(more.page(), 2);
    ctrl.resolve(&more, Ok(items_json(37, "b")));

    assert_eq!(ctrl.items().len(), 137);
    assert!(!ctrl.has_more());
    assert!(ctrl.load_more().is_none());
}

#[tokio::test]
async fn fetch_more_carries_the_next_page_parameter() {
    let fetch = ScriptedFetch::new(vec![
        Ok(items_json(IMAGES_PAGE_SIZE, "a")),
        Ok(items_json(10, "b")),
    ]);
    let mut ctrl = ImageLibraryController::new();

    ctrl.refresh(&fetch).await;
    assert!(ctrl.fetch_more(&fetch).await);
    assert_eq!(ctrl.items().len(), 110);

    let requests = fetch.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].0, "/images");
    assert!(
        requests[0]
            .1
            .contains(&("page".to_owned(), Some("1".to_owned())))
    );
    assert!(
        requests[1]
            .1
            .contains(&("page".to_owned(), Some("2".to_owned())))
    );

    // The short second page closed the listing.
    assert!(!ctrl.fetch_more(&fetch).await);
}

#[tokio::test]
async fn mars_load_more_is_gated_on_the_heuristic() {
    let fetch = ScriptedFetch::new(vec![Ok(json!({"photos": []}))]);
    let mut ctrl = MarsPhotosController::new();

    ctrl.refresh(&fetch).await;
    assert!(ctrl.phase().is_loaded());
    // An empty sol offers nothing to load more of.
    assert!(!ctrl.fetch_more(&fetch).await);
    assert_eq!(fetch.requests().len(), 1);
}

// ── Error handling through the seam ──────────────────────────────────────────

#[tokio::test]
async fn refresh_stores_the_failure_message_for_retry() {
    let fetch = ScriptedFetch::new(vec![
        Err(ApiError::Connectivity(
            "Unable to connect to NASA API server. Please ensure the backend is running."
                .into(),
        )),
        Ok(apod_json("2024-01-05")),
    ]);
    let mut ctrl = ApodController::new();

    ctrl.refresh(&fetch).await;
    let message = ctrl.phase().error_message().expect("should be an error");
    assert!(message.contains("Unable to connect"));
    assert!(ctrl.entry().is_none());

    // Retry with the same query succeeds.
    ctrl.refresh(&fetch).await;
    assert_eq!(ctrl.phase(), &Phase::Loaded);
    assert_eq!(ctrl.entry().unwrap().date, "2024-01-05");
}

#[tokio::test]
async fn undecodable_success_body_is_an_error_not_a_panic() {
    let fetch = ScriptedFetch::new(vec![Ok(json!({"totally": "unexpected"}))]);
    let mut ctrl = ApodController::new();

    ctrl.refresh(&fetch).await;
    assert!(ctrl.phase().error_message().is_some());
}
