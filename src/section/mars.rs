//! Mars Rover Photos section.

use serde_json::Value;

use super::{FetchTicket, LoadMode, Phase, SectionCore};
use crate::client::{Fetch, Param, decode};
use crate::error::ApiError;
use crate::models::{MarsPhoto, MarsPhotosResponse};

const ENDPOINT: &str = "/mars-photos";

/// Load-more is offered once at least this many photos are on screen.
///
/// The rover API reports no total for a sol, so this is a heuristic proxy
/// for "the page was probably full". It can both under- and over-offer.
pub const MARS_LOAD_MORE_HINT: usize = 25;

/// Query parameters for the rover photo search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarsQuery {
    pub rover: String,
    /// Martian solar day, kept as the string the date control holds.
    pub sol: String,
    pub camera: Option<String>,
    pub earth_date: Option<String>,
}

impl Default for MarsQuery {
    fn default() -> Self {
        Self {
            rover: "curiosity".to_owned(),
            sol: "1000".to_owned(),
            camera: None,
            earth_date: None,
        }
    }
}

/// View state for the Mars rover section.
pub struct MarsPhotosController {
    core: SectionCore,
    query: MarsQuery,
    photos: Vec<MarsPhoto>,
    /// Last successfully loaded page.
    page: u32,
}

impl MarsPhotosController {
    pub fn new() -> Self {
        Self {
            core: SectionCore::default(),
            query: MarsQuery::default(),
            photos: Vec::new(),
            page: 1,
        }
    }

    pub fn phase(&self) -> &Phase {
        self.core.phase()
    }

    pub fn query(&self) -> &MarsQuery {
        &self.query
    }

    pub fn photos(&self) -> &[MarsPhoto] {
        &self.photos
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_rover(&mut self, rover: impl Into<String>) -> FetchTicket {
        self.query.rover = rover.into();
        self.reset()
    }

    pub fn set_sol(&mut self, sol: impl Into<String>) -> FetchTicket {
        self.query.sol = sol.into();
        self.reset()
    }

    /// `None` clears the camera filter back to "all cameras".
    pub fn set_camera(&mut self, camera: Option<String>) -> FetchTicket {
        self.query.camera = camera;
        self.reset()
    }

    pub fn set_earth_date(&mut self, earth_date: Option<String>) -> FetchTicket {
        self.query.earth_date = earth_date;
        self.reset()
    }

    /// Re-runs the current query from page one.
    pub fn retry(&mut self) -> FetchTicket {
        self.reset()
    }

    fn reset(&mut self) -> FetchTicket {
        self.core.begin(LoadMode::Reset, 1)
    }

    /// Whether the load-more affordance should be offered.
    pub fn can_load_more(&self) -> bool {
        self.core.phase().is_loaded() && self.photos.len() >= MARS_LOAD_MORE_HINT
    }

    /// Begins fetching the next page, when allowed.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        self.can_load_more()
            .then(|| self.core.begin(LoadMode::Append, self.page + 1))
    }

    /// Query parameters for a given ticket (the ticket owns the page).
    pub fn params(&self, ticket: &FetchTicket) -> Vec<Param> {
        vec![
            ("rover", Some(self.query.rover.clone())),
            ("sol", Some(self.query.sol.clone())),
            ("camera", self.query.camera.clone()),
            ("earth_date", self.query.earth_date.clone()),
            ("page", Some(ticket.page().to_string())),
        ]
    }

    /// Applies a fetch outcome. Outcomes for superseded tickets are ignored.
    pub fn resolve(&mut self, ticket: &FetchTicket, outcome: Result<Value, ApiError>) {
        if !self.core.is_current(ticket) {
            return;
        }
        match outcome.and_then(decode::<MarsPhotosResponse>) {
            Ok(response) => {
                match ticket.mode() {
                    LoadMode::Reset => self.photos = response.photos,
                    LoadMode::Append => self.photos.extend(response.photos),
                }
                self.page = ticket.page();
                self.core.loaded();
            }
            Err(err) => {
                // Only a failed new search empties the screen; a failed
                // load-more keeps what was already there.
                if ticket.mode() == LoadMode::Reset {
                    self.photos.clear();
                }
                self.core.failed(err.message());
            }
        }
    }

    /// Issues and applies a reset fetch in one step.
    pub async fn refresh(&mut self, fetch: &dyn Fetch) {
        let ticket = self.reset();
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

impl Default for MarsPhotosController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn photos_json(count: usize, start_id: u64) -> Value {
        let photos: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "id": start_id + i as u64,
                    "sol": 1000,
                    "camera": {"name": "FHAZ", "full_name": "Front Hazard Avoidance Camera"},
                    "img_src": "http://example/img.jpg",
                    "earth_date": "2015-05-30",
                    "rover": {"name": "Curiosity"},
                })
            })
            .collect();
        json!({ "photos": photos })
    }

    #[test]
    fn defaults_match_the_ui() {
        let ctrl = MarsPhotosController::new();
        assert_eq!(ctrl.query().rover, "curiosity");
        assert_eq!(ctrl.query().sol, "1000");
        assert!(ctrl.query().camera.is_none());
    }

    #[test]
    fn load_more_needs_a_loaded_page_of_decent_size() {
        let mut ctrl = MarsPhotosController::new();
        assert!(ctrl.load_more().is_none());

        let ticket = ctrl.set_sol("2000");
        ctrl.resolve(&ticket, Ok(photos_json(24, 0)));
        assert!(!ctrl.can_load_more());

        let ticket = ctrl.retry();
        ctrl.resolve(&ticket, Ok(photos_json(25, 0)));
        assert!(ctrl.can_load_more());
    }

    #[test]
    fn append_extends_and_advances_the_page() {
        let mut ctrl = MarsPhotosController::new();
        let reset = ctrl.retry();
        ctrl.resolve(&reset, Ok(photos_json(25, 0)));
        assert_eq!(ctrl.page(), 1);

        let more = ctrl.load_more().expect("gate is open");
        assert_eq!(more.page(), 2);
        ctrl.resolve(&more, Ok(photos_json(10, 100)));
        assert_eq!(ctrl.photos().len(), 35);
        assert_eq!(ctrl.page(), 2);
    }

    #[test]
    fn failed_load_more_preserves_the_accumulator() {
        let mut ctrl = MarsPhotosController::new();
        let reset = ctrl.retry();
        ctrl.resolve(&reset, Ok(photos_json(25, 0)));

        let more = ctrl.load_more().expect("gate is open");
        ctrl.resolve(
            &more,
            Err(ApiError::Remote { status: 500, message: "upstream sad".into() }),
        );
        assert_eq!(ctrl.photos().len(), 25);
        assert_eq!(ctrl.phase().error_message(), Some("upstream sad"));
    }

    #[test]
    fn failed_reset_clears_the_accumulator() {
        let mut ctrl = MarsPhotosController::new();
        let reset = ctrl.retry();
        ctrl.resolve(&reset, Ok(photos_json(25, 0)));

        let reset = ctrl.set_rover("spirit");
        ctrl.resolve(
            &reset,
            Err(ApiError::Remote { status: 400, message: "no such sol".into() }),
        );
        assert!(ctrl.photos().is_empty());
    }

    #[test]
    fn camera_filter_appears_in_params_only_when_set() {
        let mut ctrl = MarsPhotosController::new();
        let ticket = ctrl.set_camera(Some("NAVCAM".into()));
        let params = ctrl.params(&ticket);
        assert!(params.contains(&("camera", Some("NAVCAM".to_owned()))));

        let ticket = ctrl.set_camera(None);
        let params = ctrl.params(&ticket);
        assert!(params.contains(&("camera", None)));
    }
}
