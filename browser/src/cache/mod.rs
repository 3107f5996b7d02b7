// browser/src/cache/mod.rs

use folio_core::{Page, Record, RecordId};

/// Holds the single page currently in memory.
///
/// Pages are never merged: loading a new page discards the previous one.
#[derive(Debug, Default)]
pub struct PageCache {
    page: Option<Page>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched page, returning the one it displaced.
    pub fn replace(&mut self, page: Page) -> Option<Page> {
        self.page.replace(page)
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Index of the loaded page, if any page has been loaded yet.
    pub fn index(&self) -> Option<u32> {
        self.page.as_ref().map(|page| page.index)
    }

    pub fn records(&self) -> &[Record] {
        self.page
            .as_ref()
            .map(|page| page.records.as_slice())
            .unwrap_or(&[])
    }

    /// Ids of the loaded records in page order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records().iter().map(|record| record.id).collect()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records().iter().any(|record| record.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}
