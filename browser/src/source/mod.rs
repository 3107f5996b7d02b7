// browser/src/source/mod.rs

use crate::{BrowseError, Result};
use folio_core::{Page, PageResponse, Record, RecordId};
use parking_lot::RwLock;

/// Supplies one page of records per request.
///
/// Implementations own the transport. The browser only relies on every
/// record carrying a stable [`RecordId`] and on the total record count being
/// reported with each response. Failures (transport or malformed payload)
/// are reported as [`BrowseError::FetchFailure`].
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    /// Fetch the 1-based `page` holding at most `page_size` records.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PageResponse>;
}

/// Decode one collection API response body for `page`.
///
/// A body that does not decode is a [`BrowseError::FetchFailure`] for that
/// page, the same as a transport failure.
pub fn decode_api_page(page: u32, page_size: u32, body: &[u8]) -> Result<PageResponse> {
    PageResponse::from_api_json(page, page_size, body)
        .map_err(|err| BrowseError::fetch_failure(page, err.to_string()))
}

/// A collection held entirely in memory and served page by page.
///
/// The collection can be mutated between requests; each response reports
/// the size at the time it was served.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RwLock<Vec<Record>>,
}

impl MemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn push(&self, record: Record) {
        self.records.write().push(record);
    }

    /// Remove a record from the collection, returning it if present.
    pub fn remove(&self, id: RecordId) -> Option<Record> {
        let mut records = self.records.write();
        let position = records.iter().position(|record| record.id == id)?;
        Some(records.remove(position))
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordSource for MemorySource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PageResponse> {
        if page == 0 || page_size == 0 {
            return Err(BrowseError::fetch_failure(
                page,
                format!("cannot serve page {} with page size {}", page, page_size),
            ));
        }

        let records = self.records.read();
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let batch: Vec<Record> = records
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(PageResponse::new(Page::new(page, batch), records.len() as u64))
    }
}
