// browser/src/presentation/mod.rs

//! Boundary between the browser state and the display widget.

use crate::selection::SelectionStore;
use crate::{BrowseError, Result};
use folio_core::{Record, RecordId};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Records of the loaded page that are selected, in page order.
///
/// Recompute on every render: the page and the selection change
/// independently.
pub fn visible_selected<'a>(records: &'a [Record], store: &SelectionStore) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| store.is_selected(record.id))
        .collect()
}

/// A widget selection report narrowed to ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub visible_ids: Vec<RecordId>,
    pub widget_selected_ids: Vec<RecordId>,
}

/// Narrow the widget's untyped selection payload.
///
/// The payload is the list of rows the widget shows as checked, either as
/// row objects carrying an `id` field or as bare ids. Every reported id must
/// belong to `records`, the page the widget is rendering.
pub fn narrow_selection_event(records: &[Record], payload: &Value) -> Result<SelectionChange> {
    let rows = payload.as_array().ok_or_else(|| {
        BrowseError::MalformedSelectionEvent(format!("expected a list of rows, got {}", payload))
    })?;

    let visible_ids: Vec<RecordId> = records.iter().map(|record| record.id).collect();
    let visible: HashSet<RecordId> = visible_ids.iter().copied().collect();

    let mut widget_selected_ids = Vec::with_capacity(rows.len());
    for row in rows {
        let raw = match row {
            Value::Object(fields) => fields.get("id").and_then(Value::as_u64),
            other => other.as_u64(),
        };
        let id = raw.map(RecordId).ok_or_else(|| {
            BrowseError::MalformedSelectionEvent(format!("row without a usable id: {}", row))
        })?;

        if !visible.contains(&id) {
            warn!(%id, "widget reported a row that is not on the loaded page");
            return Err(BrowseError::MalformedSelectionEvent(format!(
                "record {} is not on the loaded page",
                id
            )));
        }
        widget_selected_ids.push(id);
    }

    Ok(SelectionChange {
        visible_ids,
        widget_selected_ids,
    })
}

/// Figures shown around the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub selected_count: usize,
    pub total_records: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl SelectionSummary {
    pub fn selection_label(&self) -> &'static str {
        if self.selected_count == 1 {
            "artwork selected"
        } else {
            "artworks selected"
        }
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} | {} artworks | page {} of {}",
            self.selected_count,
            self.selection_label(),
            group_thousands(self.total_records),
            self.current_page,
            group_thousands(self.total_pages as u64),
        )?;
        if self.loading {
            write!(f, " | loading")?;
        }
        if let Some(error) = &self.last_error {
            write!(f, " | error: {}", error)?;
        }
        Ok(())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Text box behind "select first N rows".
///
/// The text survives a rejected count so it can be corrected, and is
/// cleared once a selection went through.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CustomCountInput {
    text: String,
}

impl CustomCountInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn apply(&mut self, store: &mut SelectionStore, page_ids: &[RecordId]) -> Result<usize> {
        let taken = store.select_first_n_from_input(page_ids, &self.text)?;
        self.text.clear();
        Ok(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records(ids: &[u64]) -> Vec<Record> {
        ids.iter()
            .map(|&id| Record::new(id, format!("Artwork {}", id)))
            .collect()
    }

    fn ids(raw: &[u64]) -> Vec<RecordId> {
        raw.iter().copied().map(RecordId).collect()
    }

    #[test]
    fn test_visible_selected_keeps_page_order() {
        let page = records(&[5, 3, 9, 1]);
        let mut store = SelectionStore::new();
        store.select_page(&ids(&[1, 5, 77]));

        let shown: Vec<RecordId> = visible_selected(&page, &store)
            .iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(shown, ids(&[5, 1]));
    }

    #[test]
    fn test_visible_selected_follows_store_changes() {
        let page = records(&[1, 2]);
        let mut store = SelectionStore::new();
        assert!(visible_selected(&page, &store).is_empty());

        store.select_page(&ids(&[2]));
        assert_eq!(visible_selected(&page, &store).len(), 1);
    }

    #[test]
    fn test_narrow_row_objects() {
        let page = records(&[1, 2, 3, 4]);
        let payload = json!([
            {"id": 3, "title": "Artwork 3", "date_start": 1900},
            {"id": 1}
        ]);

        let change = narrow_selection_event(&page, &payload).unwrap();
        assert_eq!(
            change,
            SelectionChange {
                visible_ids: ids(&[1, 2, 3, 4]),
                widget_selected_ids: ids(&[3, 1]),
            }
        );
    }

    #[test]
    fn test_narrow_bare_ids_and_empty() {
        let page = records(&[1, 2]);
        let change = narrow_selection_event(&page, &json!([2])).unwrap();
        assert_eq!(change.widget_selected_ids, ids(&[2]));

        let cleared = narrow_selection_event(&page, &json!([])).unwrap();
        assert!(cleared.widget_selected_ids.is_empty());
        assert_eq!(cleared.visible_ids, ids(&[1, 2]));
    }

    #[test]
    fn test_narrow_rejects_malformed_payloads() {
        let page = records(&[1, 2]);
        for payload in [
            json!({"id": 1}),
            json!([{"title": "no id"}]),
            json!([{"id": "1"}]),
            json!([-4]),
            json!([1, 42]),
        ] {
            assert!(
                matches!(
                    narrow_selection_event(&page, &payload),
                    Err(BrowseError::MalformedSelectionEvent(_))
                ),
                "{} should be rejected",
                payload
            );
        }
    }

    #[test]
    fn test_summary_display() {
        let summary = SelectionSummary {
            selected_count: 1,
            total_records: 129_884,
            current_page: 2,
            total_pages: 10_824,
            loading: false,
            last_error: None,
        };
        assert_eq!(
            summary.to_string(),
            "1 artwork selected | 129,884 artworks | page 2 of 10,824"
        );

        let busy = SelectionSummary {
            selected_count: 0,
            loading: true,
            last_error: Some("failed to fetch page 3: timeout".to_string()),
            ..summary
        };
        assert_eq!(busy.selection_label(), "artworks selected");
        assert!(busy.to_string().ends_with("| loading | error: failed to fetch page 3: timeout"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_custom_count_input_retains_text_on_error() {
        let page = ids(&[10, 11, 12]);
        let mut store = SelectionStore::new();
        let mut input = CustomCountInput::new();

        input.set("0");
        assert!(input.apply(&mut store, &page).is_err());
        assert_eq!(input.text(), "0");
        assert!(store.is_empty());

        input.set("2");
        assert_eq!(input.apply(&mut store, &page).unwrap(), 2);
        assert_eq!(input.text(), "");
        assert_eq!(store.sorted_ids(), ids(&[10, 11]));
    }
}
