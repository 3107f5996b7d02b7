//! Paginated browsing with a page-independent selection set.
//!
//! Only one page of the collection is ever held in memory, while the set of
//! selected records spans the whole collection. This crate provides the
//! page cache, the selection store, the pagination controller and the
//! adapter that reconciles page-local widget reports with the global
//! selection.

pub mod cache;
pub mod config;
pub mod pagination;
pub mod presentation;
pub mod selection;
pub mod session;
pub mod source;

pub use cache::PageCache;
pub use config::BrowserConfig;
pub use pagination::{
    ApplyOutcome, FetchOutcome, PageRequest, PaginationController, PaginationState,
};
pub use presentation::{
    narrow_selection_event, visible_selected, CustomCountInput, SelectionChange, SelectionSummary,
};
pub use selection::{parse_count, Reconciliation, SelectionStore};
pub use session::Session;
pub use source::{decode_api_page, MemorySource, RecordSource};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    #[error("failed to fetch page {page}: {reason}")]
    FetchFailure { page: u32, reason: String },

    #[error("invalid count {input:?}: expected a positive whole number")]
    InvalidCount { input: String },

    #[error("invalid page index {page}: pages start at 1")]
    InvalidPage { page: u32 },

    #[error("malformed selection event: {0}")]
    MalformedSelectionEvent(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BrowseError {
    pub fn fetch_failure(page: u32, reason: impl Into<String>) -> Self {
        Self::FetchFailure {
            page,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowseError>;
