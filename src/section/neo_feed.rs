//! Near Earth Objects section.

use serde_json::Value;

use super::{FetchTicket, LoadMode, Phase, SectionCore};
use crate::client::{Fetch, Param, decode};
use crate::date::{days_ago, format_date, today};
use crate::error::ApiError;
use crate::models::{NearEarthObject, NeoFeed};
use crate::neo::{self, NeoStats};

const ENDPOINT: &str = "/neo";

/// View state for the NEO section: a date range and the feed it produced.
/// List and statistics views derive from the feed on demand.
pub struct NeoController {
    core: SectionCore,
    start_date: String,
    end_date: String,
    feed: Option<NeoFeed>,
}

impl NeoController {
    /// Starts on the week ahead, the feed's most interesting window.
    pub fn new() -> Self {
        Self {
            core: SectionCore::default(),
            start_date: format_date(today()),
            end_date: format_date(days_ago(-7)),
            feed: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        self.core.phase()
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn feed(&self) -> Option<&NeoFeed> {
        self.feed.as_ref()
    }

    /// Selects a date range and begins a fresh fetch.
    pub fn set_range(
        &mut self,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> FetchTicket {
        self.start_date = start_date.into();
        self.end_date = end_date.into();
        self.begin()
    }

    /// Preset: the trailing week.
    pub fn last_seven_days(&mut self) -> FetchTicket {
        self.set_range(format_date(days_ago(7)), format_date(today()))
    }

    /// Preset: the coming week.
    pub fn next_seven_days(&mut self) -> FetchTicket {
        self.set_range(format_date(today()), format_date(days_ago(-7)))
    }

    /// Re-fetches the same range after a failure.
    pub fn retry(&mut self) -> FetchTicket {
        self.begin()
    }

    fn begin(&mut self) -> FetchTicket {
        self.core.begin(LoadMode::Reset, 1)
    }

    /// Query parameters for the current range.
    pub fn params(&self) -> Vec<Param> {
        vec![
            ("start_date", Some(self.start_date.clone())),
            ("end_date", Some(self.end_date.clone())),
        ]
    }

    /// Applies a fetch outcome. Outcomes for superseded tickets are ignored.
    pub fn resolve(&mut self, ticket: &FetchTicket, outcome: Result<Value, ApiError>) {
        if !self.core.is_current(ticket) {
            return;
        }
        match outcome.and_then(decode::<NeoFeed>) {
            Ok(feed) => {
                self.feed = Some(feed);
                self.core.loaded();
            }
            Err(err) => {
                self.feed = None;
                self.core.failed(err.message());
            }
        }
    }

    /// Issues and applies a fetch for the current range in one step.
    pub async fn refresh(&mut self, fetch: &dyn Fetch) {
        let ticket = self.begin();
        let params = self.params();
        let outcome = fetch.request(ENDPOINT, &params).await;
        self.resolve(&ticket, outcome);
    }

    /// The flattened, diameter-sorted object list. Empty until a feed loads.
    pub fn objects(&self) -> Vec<&NearEarthObject> {
        self.feed.as_ref().map(neo::flatten).unwrap_or_default()
    }

    /// The derived stat block, once a feed is loaded.
    pub fn stats(&self) -> Option<NeoStats<'_>> {
        self.feed.as_ref().map(neo::stats)
    }
}

impl Default for NeoController {
    fn default() -> Self {
        Self::new()
    }
}
