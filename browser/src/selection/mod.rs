// browser/src/selection/mod.rs

//! The global selection set.
//!
//! Selection is kept by record id, independently of which page is loaded,
//! so it can reference records that are no longer (or never were at the same
//! time) in memory. Ids only ever leave the set through an explicit
//! deselection: [`SelectionStore::deselect_page`] or a widget report handled
//! by [`SelectionStore::reconcile`].

use crate::{BrowseError, Result};
use folio_core::RecordId;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Net effect of one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconciliation {
    pub added: usize,
    pub removed: usize,
}

#[derive(Debug, Default, Clone)]
pub struct SelectionStore {
    selected: HashSet<RecordId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every id of the page. Returns how many were not already selected.
    pub fn select_page(&mut self, page_ids: &[RecordId]) -> usize {
        let before = self.selected.len();
        self.selected.extend(page_ids.iter().copied());
        let added = self.selected.len() - before;
        debug!(added, total = self.selected.len(), "selected page");
        added
    }

    /// Remove every id of the page that is selected. Returns how many were removed.
    pub fn deselect_page(&mut self, page_ids: &[RecordId]) -> usize {
        let removed = page_ids
            .iter()
            .filter(|&&id| self.selected.remove(&id))
            .count();
        debug!(removed, total = self.selected.len(), "deselected page");
        removed
    }

    /// Select the first `n` ids of the page, in page order.
    ///
    /// Scoped to the given page only: asking for more than the page holds
    /// selects the whole page. Returns how many ids were taken from the page.
    pub fn select_first_n(&mut self, page_ids: &[RecordId], n: i64) -> Result<usize> {
        if n <= 0 {
            warn!(n, "rejected custom selection count");
            return Err(BrowseError::InvalidCount {
                input: n.to_string(),
            });
        }

        let take = usize::try_from(n).unwrap_or(usize::MAX).min(page_ids.len());
        self.selected.extend(page_ids[..take].iter().copied());
        debug!(taken = take, total = self.selected.len(), "selected first rows");
        Ok(take)
    }

    /// Parse user input as a count and select that many leading ids.
    pub fn select_first_n_from_input(
        &mut self,
        page_ids: &[RecordId],
        input: &str,
    ) -> Result<usize> {
        let n = parse_count(input)?;
        self.select_first_n(page_ids, n)
    }

    /// Fold a page-local selection report from the display widget into the
    /// global set.
    ///
    /// The widget only knows about `visible_ids`, so its report is
    /// authoritative for exactly those ids: visible ids missing from the
    /// report are deselected and reported ids are selected. Selections on
    /// other pages are left untouched.
    pub fn reconcile(
        &mut self,
        visible_ids: &[RecordId],
        widget_selected_ids: &[RecordId],
    ) -> Reconciliation {
        let before = self.selected.len();

        // kept = selected - visible
        let dropped: HashSet<RecordId> = visible_ids
            .iter()
            .copied()
            .filter(|id| self.selected.remove(id))
            .collect();
        let kept = self.selected.len();

        let reported: HashSet<RecordId> = widget_selected_ids.iter().copied().collect();
        let delta = Reconciliation {
            added: reported
                .iter()
                .filter(|&id| !dropped.contains(id) && !self.selected.contains(id))
                .count(),
            removed: dropped.iter().filter(|&id| !reported.contains(id)).count(),
        };

        // selected = kept | reported
        self.selected.extend(reported);

        debug!(
            before,
            kept,
            after = self.selected.len(),
            added = delta.added,
            removed = delta.removed,
            "reconciled widget selection"
        );
        delta
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.selected.iter().copied()
    }

    /// Selected ids in ascending order, for display.
    pub fn sorted_ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

/// Parse a custom-selection count typed by the user.
///
/// Surrounding whitespace is ignored; anything else that is not a positive
/// base-10 integer is an [`BrowseError::InvalidCount`]. This is stricter than
/// a leading-digits parse: `"5 rows"` and `"3.5"` are rejected rather than
/// read as 5 and 3.
pub fn parse_count(input: &str) -> Result<i64> {
    match input.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BrowseError::InvalidCount {
            input: input.to_string(),
        }),
    }
}
