//! Astronomy Picture of the Day section.

use std::collections::HashSet;

use serde_json::Value;

use super::{FetchTicket, LoadMode, Phase, SectionCore};
use crate::client::{Fetch, Param, decode};
use crate::date::{format_date, random_date_within_days, today};
use crate::error::ApiError;
use crate::models::ApodEntry;

const ENDPOINT: &str = "/apod";

/// APOD browses the archive back roughly ten years.
const RANDOM_WINDOW_DAYS: u32 = 3650;

/// View state for the picture-of-the-day section: one selected date, one
/// entry, and a session-local favorites set.
pub struct ApodController {
    core: SectionCore,
    date: String,
    entry: Option<ApodEntry>,
    favorites: HashSet<String>,
}

impl ApodController {
    /// Starts on today's picture.
    pub fn new() -> Self {
        Self {
            core: SectionCore::default(),
            date: format_date(today()),
            entry: None,
            favorites: HashSet::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        self.core.phase()
    }

    /// The currently selected date, ISO form.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn entry(&self) -> Option<&ApodEntry> {
        self.entry.as_ref()
    }

    /// Selects a date and begins a fresh fetch.
    pub fn set_date(&mut self, date: impl Into<String>) -> FetchTicket {
        self.date = date.into();
        self.begin()
    }

    /// Jumps to a random date within the archive window.
    pub fn pick_random_date(&mut self) -> FetchTicket {
        self.date = format_date(random_date_within_days(RANDOM_WINDOW_DAYS));
        self.begin()
    }

    /// Back to today's picture.
    pub fn pick_today(&mut self) -> FetchTicket {
        self.set_date(format_date(today()))
    }

    /// Re-fetches the same date after a failure.
    pub fn retry(&mut self) -> FetchTicket {
        self.begin()
    }

    fn begin(&mut self) -> FetchTicket {
        self.core.begin(LoadMode::Reset, 1)
    }

    /// Query parameters for the current selection.
    pub fn params(&self) -> Vec<Param> {
        vec![("date", Some(self.date.clone()))]
    }

    /// Applies a fetch outcome. Outcomes for superseded tickets are ignored.
    pub fn resolve(&mut self, ticket: &FetchTicket, outcome: Result<Value, ApiError>) {
        if !self.core.is_current(ticket) {
            return;
        }
        match outcome.and_then(decode::<ApodEntry>) {
            Ok(entry) => {
                self.entry = Some(entry);
                self.core.loaded();
            }
            Err(err) => {
                self.entry = None;
                self.core.failed(err.message());
            }
        }
    }

    /// Issues and applies a fetch for the current date in one step.
    pub async fn refresh(&mut self, fetch: &dyn Fetch) {
        let ticket = self.begin();
        let params = self.params();
        let outcome = fetch.request(ENDPOINT, &params).await;
        self.resolve(&ticket, outcome);
    }

    // ── Favorites (session-local, no network effect) ─────────────────────────

    /// Flips the date in or out of the favorites set; returns whether it is
    /// a favorite afterwards.
    pub fn toggle_favorite(&mut self, date: &str) -> bool {
        if self.favorites.remove(date) {
            false
        } else {
            self.favorites.insert(date.to_owned());
            true
        }
    }

    pub fn is_favorite(&self, date: &str) -> bool {
        self.favorites.contains(date)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }
}

impl Default for ApodController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_json(date: &str) -> Value {
        json!({
            "date": date,
            "title": "A Space Thing",
            "explanation": "It is far away.",
            "media_type": "image",
            "url": "http://example/sd.jpg",
            "hdurl": "http://example/hd.jpg",
        })
    }

    #[test]
    fn starts_idle_on_today() {
        let ctrl = ApodController::new();
        assert_eq!(ctrl.phase(), &Phase::Idle);
        assert_eq!(ctrl.date(), format_date(today()));
        assert!(ctrl.entry().is_none());
    }

    #[test]
    fn set_date_then_success_lands_in_loaded() {
        let mut ctrl = ApodController::new();
        let ticket = ctrl.set_date("2024-01-05");
        assert!(ctrl.phase().is_loading());

        ctrl.resolve(&ticket, Ok(entry_json("2024-01-05")));
        assert!(ctrl.phase().is_loaded());
        assert_eq!(ctrl.entry().unwrap().date, "2024-01-05");
    }

    #[test]
    fn failure_clears_the_entry_and_keeps_the_query() {
        let mut ctrl = ApodController::new();
        let t1 = ctrl.set_date("2024-01-05");
        ctrl.resolve(&t1, Ok(entry_json("2024-01-05")));

        let t2 = ctrl.retry();
        ctrl.resolve(
            &t2,
            Err(ApiError::Remote { status: 500, message: "boom".into() }),
        );
        assert_eq!(ctrl.phase().error_message(), Some("boom"));
        assert!(ctrl.entry().is_none());
        assert_eq!(ctrl.date(), "2024-01-05");
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let mut ctrl = ApodController::new();
        let stale = ctrl.set_date("2024-01-05");
        let current = ctrl.set_date("2024-02-06");

        ctrl.resolve(&current, Ok(entry_json("2024-02-06")));
        ctrl.resolve(&stale, Ok(entry_json("2024-01-05")));

        assert_eq!(ctrl.entry().unwrap().date, "2024-02-06");
        assert!(ctrl.phase().is_loaded());
    }

    #[test]
    fn favorites_toggle_membership() {
        let mut ctrl = ApodController::new();
        assert!(ctrl.toggle_favorite("2024-01-05"));
        assert!(ctrl.is_favorite("2024-01-05"));
        assert!(!ctrl.toggle_favorite("2024-01-05"));
        assert!(!ctrl.is_favorite("2024-01-05"));
        assert_eq!(ctrl.favorite_count(), 0);
    }

    #[test]
    fn random_date_is_iso_and_not_in_the_future() {
        let mut ctrl = ApodController::new();
        ctrl.pick_random_date();
        let picked = crate::date::parse_date(ctrl.date()).unwrap();
        assert!(picked <= today());
    }
}
