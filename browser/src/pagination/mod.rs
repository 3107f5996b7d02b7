// browser/src/pagination/mod.rs

//! Page navigation.
//!
//! A navigation is split in two halves so that several fetches can be in
//! flight while the controller stays on a single thread of control:
//! [`PaginationController::request_page`] marks the page as wanted and hands
//! back a [`PageRequest`] that owns everything needed to fetch it, and
//! [`PaginationController::apply`] folds the settled result back in. Only a
//! result for the page most recently requested is applied; anything else is
//! reported as [`ApplyOutcome::Stale`] and dropped.

use crate::cache::PageCache;
use crate::config::BrowserConfig;
use crate::source::RecordSource;
use crate::{BrowseError, Result};
use folio_core::PageResponse;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_records: u64,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_records: 0,
        }
    }

    /// `ceil(total_records / page_size)`.
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        let pages = self.total_records.div_ceil(self.page_size as u64);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Zero-based offset of the first row of the current page.
    pub fn first_row_offset(&self) -> u64 {
        (self.current_page.saturating_sub(1) as u64) * self.page_size as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The response replaced the page cache.
    Applied,
    /// The response was for a page that is no longer requested.
    Stale,
}

/// A settled fetch, tagged with the page it was issued for.
#[derive(Debug)]
pub struct FetchOutcome {
    pub page: u32,
    pub result: Result<PageResponse>,
}

/// An issued page request. Owns a handle to the source so it can be
/// awaited while the controller keeps accepting other calls.
#[derive(Debug)]
pub struct PageRequest<S> {
    page: u32,
    page_size: u32,
    source: Arc<S>,
}

impl<S: RecordSource> PageRequest<S> {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub async fn fetch(self) -> FetchOutcome {
        let result = match self.source.fetch_page(self.page, self.page_size).await {
            Ok(response) if response.page.index != self.page => Err(BrowseError::fetch_failure(
                self.page,
                format!("source answered with page {}", response.page.index),
            )),
            Ok(response) if response.page.len() > self.page_size as usize => {
                Err(BrowseError::fetch_failure(
                    self.page,
                    format!(
                        "source returned {} records for a page of {}",
                        response.page.len(),
                        self.page_size
                    ),
                ))
            }
            other => other,
        };

        FetchOutcome {
            page: self.page,
            result,
        }
    }
}

pub struct PaginationController<S> {
    source: Arc<S>,
    state: PaginationState,
    cache: PageCache,
    requested: Option<u32>,
    page_link_size: u32,
}

impl<S: RecordSource> PaginationController<S> {
    pub fn new(source: Arc<S>, config: &BrowserConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            state: PaginationState::new(config.page_size),
            cache: PageCache::new(),
            requested: None,
            page_link_size: config.page_link_size,
        })
    }

    /// Mark `page` as the wanted page and return the request to run.
    ///
    /// Requests are not deduplicated. Issuing a new request supersedes any
    /// request still in flight.
    pub fn request_page(&mut self, page: u32) -> Result<PageRequest<S>> {
        if page == 0 {
            return Err(BrowseError::InvalidPage { page });
        }

        if let Some(previous) = self.requested.replace(page) {
            debug!(previous, page, "superseding in-flight page request");
        }

        Ok(PageRequest {
            page,
            page_size: self.state.page_size,
            source: Arc::clone(&self.source),
        })
    }

    /// Fold a settled fetch back into the controller.
    ///
    /// On failure the page cache and pagination state are left as they were
    /// and the error is returned for display.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Result<ApplyOutcome> {
        if self.requested != Some(outcome.page) {
            debug!(
                page = outcome.page,
                requested = ?self.requested,
                "discarding stale page response"
            );
            return Ok(ApplyOutcome::Stale);
        }
        self.requested = None;

        match outcome.result {
            Ok(response) => {
                self.state.current_page = outcome.page;
                self.state.total_records = response.total_records;
                let records = response.page.len();
                self.cache.replace(response.page);
                info!(
                    page = outcome.page,
                    records,
                    total_records = self.state.total_records,
                    "loaded page"
                );
                Ok(ApplyOutcome::Applied)
            }
            Err(err) => {
                warn!(page = outcome.page, error = %err, "page fetch failed");
                Err(err)
            }
        }
    }

    /// Request `page`, wait for it and apply it.
    pub async fn go_to_page(&mut self, page: u32) -> Result<ApplyOutcome> {
        let request = self.request_page(page)?;
        let outcome = request.fetch().await;
        self.apply(outcome)
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.state.total_pages()
    }

    pub fn total_records(&self) -> u64 {
        self.state.total_records
    }

    pub fn page_size(&self) -> u32 {
        self.state.page_size
    }

    /// Page of the request still awaiting a response, if any.
    pub fn requested_page(&self) -> Option<u32> {
        self.requested
    }

    pub fn is_loading(&self) -> bool {
        self.requested.is_some()
    }

    pub fn first_row_offset(&self) -> u64 {
        self.state.first_row_offset()
    }

    pub fn has_next(&self) -> bool {
        self.state.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.state.current_page > 1
    }

    pub fn next_page_index(&self) -> Option<u32> {
        self.has_next().then(|| self.state.current_page + 1)
    }

    pub fn previous_page_index(&self) -> Option<u32> {
        self.has_previous().then(|| self.state.current_page - 1)
    }

    /// Numbered page links around the current page, at most
    /// `page_link_size` wide and clamped to the known page range.
    pub fn page_links(&self) -> Vec<u32> {
        page_window(
            self.state.current_page,
            self.total_pages(),
            self.page_link_size,
        )
    }
}

fn page_window(current: u32, total_pages: u32, width: u32) -> Vec<u32> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(width / 2).max(1);
    let end = start.saturating_add(width - 1).min(total_pages);
    let start = end.saturating_sub(width - 1).max(1);
    (start..=end).collect()
}
