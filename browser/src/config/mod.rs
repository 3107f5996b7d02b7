// browser/src/config/mod.rs

use crate::{BrowseError, Result};
use serde::Deserialize;

/// Rows per page used by the collection API.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Numbered page links shown by the paginator.
pub const DEFAULT_PAGE_LINK_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub page_size: u32,
    pub page_link_size: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_link_size: DEFAULT_PAGE_LINK_SIZE,
        }
    }
}

impl BrowserConfig {
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_link_size(mut self, page_link_size: u32) -> Self {
        self.page_link_size = page_link_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BrowseError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }

        if self.page_link_size == 0 {
            return Err(BrowseError::InvalidConfig(
                "page_link_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
