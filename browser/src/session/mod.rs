// browser/src/session/mod.rs

use crate::config::BrowserConfig;
use crate::pagination::{ApplyOutcome, FetchOutcome, PageRequest, PaginationController};
use crate::presentation::{
    narrow_selection_event, visible_selected, CustomCountInput, SelectionSummary,
};
use crate::selection::{Reconciliation, SelectionStore};
use crate::source::RecordSource;
use crate::Result;
use folio_core::Record;
use serde_json::Value;
use std::sync::Arc;

/// Everything one table view needs: the navigation state with its page
/// cache, the selection set, and the custom-count text box.
///
/// All mutation goes through `&mut self`, so fetch results and selection
/// changes are applied on whichever thread owns the session.
pub struct Session<S> {
    pager: PaginationController<S>,
    selection: SelectionStore,
    custom_count: CustomCountInput,
    last_error: Option<String>,
}

impl<S: RecordSource> Session<S> {
    pub fn new(source: S, config: &BrowserConfig) -> Result<Self> {
        Self::with_shared_source(Arc::new(source), config)
    }

    pub fn with_shared_source(source: Arc<S>, config: &BrowserConfig) -> Result<Self> {
        Ok(Self {
            pager: PaginationController::new(source, config)?,
            selection: SelectionStore::new(),
            custom_count: CustomCountInput::new(),
            last_error: None,
        })
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<ApplyOutcome> {
        let request = self.request_page(page)?;
        let outcome = request.fetch().await;
        self.apply(outcome)
    }

    pub fn request_page(&mut self, page: u32) -> Result<PageRequest<S>> {
        self.pager.request_page(page)
    }

    /// Apply a settled fetch. Failures are kept for display until the next
    /// successful load.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Result<ApplyOutcome> {
        match self.pager.apply(outcome) {
            Ok(ApplyOutcome::Applied) => {
                self.last_error = None;
                Ok(ApplyOutcome::Applied)
            }
            Ok(ApplyOutcome::Stale) => Ok(ApplyOutcome::Stale),
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Move one page forward. `None` when already on the last page.
    pub async fn next_page(&mut self) -> Result<Option<ApplyOutcome>> {
        match self.pager.next_page_index() {
            Some(page) => self.go_to_page(page).await.map(Some),
            None => Ok(None),
        }
    }

    /// Move one page back. `None` when already on the first page.
    pub async fn previous_page(&mut self) -> Result<Option<ApplyOutcome>> {
        match self.pager.previous_page_index() {
            Some(page) => self.go_to_page(page).await.map(Some),
            None => Ok(None),
        }
    }

    pub fn select_page(&mut self) -> usize {
        let ids = self.pager.cache().ids();
        self.selection.select_page(&ids)
    }

    pub fn deselect_page(&mut self) -> usize {
        let ids = self.pager.cache().ids();
        self.selection.deselect_page(&ids)
    }

    pub fn set_custom_count(&mut self, text: impl Into<String>) {
        self.custom_count.set(text);
    }

    pub fn custom_count_text(&self) -> &str {
        self.custom_count.text()
    }

    /// Select the first N rows of the loaded page, N taken from the
    /// custom-count text box.
    pub fn custom_select(&mut self) -> Result<usize> {
        let ids = self.pager.cache().ids();
        self.custom_count.apply(&mut self.selection, &ids)
    }

    /// Handle the widget's report of which rendered rows are checked.
    pub fn widget_selection_changed(&mut self, payload: &Value) -> Result<Reconciliation> {
        let change = narrow_selection_event(self.pager.cache().records(), payload)?;
        Ok(self
            .selection
            .reconcile(&change.visible_ids, &change.widget_selected_ids))
    }

    pub fn records(&self) -> &[Record] {
        self.pager.cache().records()
    }

    pub fn visible_selected(&self) -> Vec<&Record> {
        visible_selected(self.pager.cache().records(), &self.selection)
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            selected_count: self.selection.count(),
            total_records: self.pager.total_records(),
            current_page: self.pager.current_page(),
            total_pages: self.pager.total_pages(),
            loading: self.pager.is_loading(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn pagination(&self) -> &PaginationController<S> {
        &self.pager
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pager.is_loading()
    }
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("selection", &self.selection)
            .field("custom_count", &self.custom_count)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
