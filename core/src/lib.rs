//! Shared data model for folio.
//!
//! A collection is browsed one page at a time. Every crate in the workspace
//! speaks in terms of [`RecordId`], [`Record`] and [`Page`]; the record
//! source hands back a [`PageResponse`] per request.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable identifier of one record in the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One loaded row. Only `id` is interpreted; the rest is display payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: RecordId(id),
            title: title.into(),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.place_of_origin = Some(origin.into());
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = Some(artist.into());
        self
    }

    pub fn inscriptions(mut self, text: impl Into<String>) -> Self {
        self.inscriptions = Some(text.into());
        self
    }

    pub fn dated(mut self, start: i32, end: i32) -> Self {
        self.date_start = Some(start);
        self.date_end = Some(end);
        self
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)?;
        if let Some(artist) = &self.artist_display {
            write!(f, " / {}", artist.lines().next().unwrap_or_default())?;
        }
        match (self.date_start, self.date_end) {
            (Some(start), Some(end)) if start == end => write!(f, " ({})", start),
            (Some(start), Some(end)) => write!(f, " ({}-{})", start, end),
            (Some(start), None) => write!(f, " ({}-)", start),
            (None, Some(end)) => write!(f, " (-{})", end),
            (None, None) => Ok(()),
        }
    }
}

/// An ordered batch of records together with the 1-based index that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: u32,
    pub records: Vec<Record>,
}

impl Page {
    pub fn new(index: u32, records: Vec<Record>) -> Self {
        Self { index, records }
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(|record| record.id)
    }

    /// Record ids in page order.
    pub fn record_ids(&self) -> Vec<RecordId> {
        self.ids().collect()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What a record source returns for one page request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    pub page: Page,
    /// Authoritative collection size at the time of the request.
    pub total_records: u64,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response for page {page} carries {count} records, more than the page size {page_size}")]
    Oversized {
        page: u32,
        count: usize,
        page_size: u32,
    },
}

#[derive(Deserialize)]
struct Envelope {
    pagination: Pagination,
    data: Vec<Record>,
}

#[derive(Deserialize)]
struct Pagination {
    total: u64,
}

impl PageResponse {
    pub fn new(page: Page, total_records: u64) -> Self {
        Self {
            page,
            total_records,
        }
    }

    /// Decode the collection API envelope:
    /// `{"pagination": {"total": N, ...}, "data": [record, ...]}`.
    ///
    /// Unknown fields are ignored on both the envelope and the records.
    pub fn from_api_json(page: u32, page_size: u32, body: &[u8]) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_slice(body)?;
        if envelope.data.len() > page_size as usize {
            return Err(DecodeError::Oversized {
                page,
                count: envelope.data.len(),
                page_size,
            });
        }

        Ok(Self {
            page: Page::new(page, envelope.data),
            total_records: envelope.pagination.total,
        })
    }
}
