//! Image and Video Library section.

use serde_json::Value;

use super::{FetchTicket, LoadMode, Phase, SectionCore};
use crate::client::{Fetch, Param, decode};
use crate::error::ApiError;
use crate::models::{ImageItem, ImageSearchResponse};

const ENDPOINT: &str = "/images";

/// The library returns at most this many items per page; a short page means
/// the listing is exhausted.
pub const IMAGES_PAGE_SIZE: usize = 100;

/// Query parameters for the library search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub q: String,
    /// `"image"`, `"video"`, or empty for all media.
    pub media_type: String,
}

impl Default for ImageQuery {
    fn default() -> Self {
        Self { q: "mars".to_owned(), media_type: "image".to_owned() }
    }
}

/// View state for the searchable, load-more-paginated library section.
pub struct ImageLibraryController {
    core: SectionCore,
    query: ImageQuery,
    items: Vec<ImageItem>,
    /// Next page to request once the current results are in.
    page: u32,
    has_more: bool,
}

impl ImageLibraryController {
    pub fn new() -> Self {
        Self {
            core: SectionCore::default(),
            query: ImageQuery::default(),
            items: Vec::new(),
            page: 1,
            has_more: true,
        }
    }

    pub fn phase(&self) -> &Phase {
        self.core.phase()
    }

    pub fn query(&self) -> &ImageQuery {
        &self.query
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn set_query(&mut self, q: impl Into<String>) -> FetchTicket {
        self.query.q = q.into();
        self.search()
    }

    pub fn set_media_type(&mut self, media_type: impl Into<String>) -> FetchTicket {
        self.query.media_type = media_type.into();
        self.search()
    }

    /// Begins a fresh search for the current query.
    pub fn search(&mut self) -> FetchTicket {
        self.core.begin(LoadMode::Reset, 1)
    }

    /// Re-runs the current search after a failure.
    pub fn retry(&mut self) -> FetchTicket {
        self.search()
    }

    /// Whether the load-more affordance should be offered.
    pub fn can_load_more(&self) -> bool {
        self.core.phase().is_loaded() && self.has_more
    }

    /// Begins fetching the next page, when allowed.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        self.can_load_more()
            .then(|| self.core.begin(LoadMode::Append, self.page))
    }

    /// Query parameters for a given ticket (the ticket owns the page).
    pub fn params(&self, ticket: &FetchTicket) -> Vec<Param> {
        vec![
            ("q", Some(self.query.q.clone())),
            ("media_type", Some(self.query.media_type.clone())),
            ("page", Some(ticket.page().to_string())),
        ]
    }

    /// Applies a fetch outcome. Outcomes for superseded tickets are ignored.
    pub fn resolve(&mut self, ticket: &FetchTicket, outcome: Result<Value, ApiError>) {
        if !self.core.is_current(ticket) {
            return;
        }
        match outcome.and_then(decode::<ImageSearchResponse>) {
            Ok(response) => {
                let new_items = response.collection.items;
                if ticket.mode() == LoadMode::Reset && new_items.is_empty() {
                    self.items.clear();
                    self.has_more = false;
                } else {
                    self.has_more = new_items.len() == IMAGES_PAGE_SIZE;
                    match ticket.mode() {
                        LoadMode::Reset => self.items = new_items,
                        LoadMode::Append => self.items.extend(new_items),
                    }
                    self.page = ticket.page() + 1;
                }
                self.core.loaded();
            }
            Err(err) => {
                if ticket.mode() == LoadMode::Reset {
                    self.items.clear();
                }
                self.core.failed(err.message());
            }
        }
    }

    /// Render identity for the item at `index`. The remote id alone is not
    /// unique (the library repeats ids across pages), so the position is
    /// folded in.
    pub fn item_key(&self, index: usize) -> Option<String> {
        self.items
            .get(index)
            .and_then(ImageItem::record)
            .map(|record| format!("{}-{index}", record.nasa_id))
    }

    /// Issues and applies a reset fetch in one step.
    pub async fn refresh(&mut self, fetch: &dyn Fetch) {
        let ticket = self.search();
        let params = self.params(&ticket);
        let outcome = fetch.request(ENDPOINT, &params).await;
        self.resolve(&ticket, outcome);
    }

    /// Issues and applies a load-more fetch; false when load-more is not
    /// currently allowed.
    pub async fn fetch_more(&mut self, fetch: &dyn Fetch) -> bool {
        let Some(ticket) = self.load_more() else {
            return false;
        };
        let params = self.params(&ticket);
        let outcome = fetch.request(ENDPOINT, &params).await;
        self.resolve(&ticket, outcome);
        true
    }
}

impl Default for ImageLibraryController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items_json(count: usize, id_prefix: &str) -> Value {
        let items: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "data": [{
                        "nasa_id": format!("{id_prefix}{i}"),
                        "title": format!("Item {i}"),
                        "media_type": "image",
                    }],
                    "links": [{"href": "http://example/thumb.jpg"}],
                })
            })
            .collect();
        json!({ "collection": { "items": items } })
    }

    #[test]
    fn full_page_keeps_has_more_open() {
        let mut ctrl = ImageLibraryController::new();
        let ticket = ctrl.search();
        ctrl.resolve(&ticket, Ok(items_json(IMAGES_PAGE_SIZE, "a")));
        assert!(ctrl.has_more());
        assert_eq!(ctrl.items().len(), 100);
        assert!(ctrl.can_load_more());
    }

    #[test]
    fn short_page_closes_has_more_and_appends() {
        let mut ctrl = ImageLibraryController::new();
        let reset = ctrl.search();
        ctrl.resolve(&reset, Ok(items_json(IMAGES_PAGE_SIZE, "a")));

        let more = ctrl.load_more().expect("has more");
        assert_eq!(more.page(), 2);
        ctrl.resolve(&more, Ok(items_json(37, "b")));

        assert_eq!(ctrl.items().len(), 137);
        assert!(!ctrl.has_more());
        assert!(ctrl.load_more().is_none());
    }

    #[test]
    fn empty_reset_result_clears_everything() {
        let mut ctrl = ImageLibraryController::new();
        let reset = ctrl.search();
        ctrl.resolve(&reset, Ok(items_json(40, "a")));

        let reset = ctrl.set_query("nothing-matches-this");
        ctrl.resolve(&reset, Ok(items_json(0, "b")));
        assert!(ctrl.items().is_empty());
        assert!(!ctrl.has_more());
        assert!(ctrl.phase().is_loaded());
    }

    #[test]
    fn stale_search_never_overwrites_the_newer_one() {
        let mut ctrl = ImageLibraryController::new();
        let stale = ctrl.set_query("jupiter");
        let current = ctrl.set_query("saturn");

        // The later query's response lands first; the earlier one after.
        ctrl.resolve(&current, Ok(items_json(3, "saturn-")));
        ctrl.resolve(&stale, Ok(items_json(5, "jupiter-")));

        assert_eq!(ctrl.items().len(), 3);
        assert_eq!(ctrl.item_key(0).unwrap(), "saturn-0-0");
    }

    #[test]
    fn duplicate_remote_ids_get_distinct_keys() {
        let mut ctrl = ImageLibraryController::new();
        let ticket = ctrl.search();
        let duplicated = json!({
            "collection": { "items": [
                {"data": [{"nasa_id": "dup", "title": "x", "media_type": "image"}]},
                {"data": [{"nasa_id": "dup", "title": "y", "media_type": "image"}]},
            ]}
        });
        ctrl.resolve(&ticket, Ok(duplicated));
        assert_eq!(ctrl.item_key(0).unwrap(), "dup-0");
        assert_eq!(ctrl.item_key(1).unwrap(), "dup-1");
    }

    #[test]
    fn failed_reset_clears_failed_append_preserves() {
        let mut ctrl = ImageLibraryController::new();
        let reset = ctrl.search();
        ctrl.resolve(&reset, Ok(items_json(IMAGES_PAGE_SIZE, "a")));

        let more = ctrl.load_more().expect("has more");
        ctrl.resolve(
            &more,
            Err(ApiError::Connectivity("Unable to connect".into())),
        );
        assert_eq!(ctrl.items().len(), IMAGES_PAGE_SIZE);

        let reset = ctrl.retry();
        ctrl.resolve(
            &reset,
            Err(ApiError::Remote { status: 500, message: "down".into() }),
        );
        assert!(ctrl.items().is_empty());
    }
}
