//! Per-section view-state machines.
//!
//! Each explorer section (APOD, Mars photos, NEO, image library) owns its
//! query parameters, pagination cursor, accumulated results, and error
//! state. All of them share the same discipline:
//!
//! - any parameter change re-enters `Loading` and bumps a per-section
//!   sequence number;
//! - every fetch is issued against a [`FetchTicket`] carrying that sequence
//!   number;
//! - a resolution whose ticket is no longer current is ignored outright, so
//!   a slow response from an abandoned query can never overwrite results
//!   that belong to a newer one.
//!
//! Controllers never touch the network themselves. The caller asks for a
//! ticket, performs the fetch (through [`Fetch`](crate::Fetch) or anything
//! else), and hands the outcome back to `resolve`. The `refresh` /
//! `fetch_more` conveniences wire the two together for the common case.

mod apod;
mod images;
mod mars;
mod neo_feed;

pub use apod::ApodController;
pub use images::{IMAGES_PAGE_SIZE, ImageLibraryController, ImageQuery};
pub use mars::{MARS_LOAD_MORE_HINT, MarsPhotosController, MarsQuery};
pub use neo_feed::NeoController;

/// Lifecycle of one section's view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight for the current query.
    Loading,
    /// The accumulator reflects the current query.
    Loaded,
    /// The last fetch failed; the message is ready for display next to a
    /// retry affordance.
    Error(String),
}

impl Phase {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The stored failure message, if the section is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Whether a fetch replaces the accumulator or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// A new search: the accumulator is replaced on success, cleared on
    /// failure.
    Reset,
    /// Load-more: results append on success; what is already on screen
    /// survives a failure.
    Append,
}

/// Handle tying an in-flight fetch to the query generation it was issued
/// for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    mode: LoadMode,
    page: u32,
}

impl FetchTicket {
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// The page parameter this fetch should carry.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Shared bookkeeping: the phase tag and the request sequence counter.
#[derive(Debug, Default)]
struct SectionCore {
    phase: Phase,
    seq: u64,
}

impl SectionCore {
    fn begin(&mut self, mode: LoadMode, page: u32) -> FetchTicket {
        self.seq += 1;
        self.phase = Phase::Loading;
        FetchTicket { seq: self.seq, mode, page }
    }

    /// A ticket is current only while no newer fetch has been issued.
    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.seq
    }

    fn loaded(&mut self) {
        self.phase = Phase::Loaded;
    }

    fn failed(&mut self, message: String) {
        self.phase = Phase::Error(message);
    }

    fn phase(&self) -> &Phase {
        &self.phase
    }
}
