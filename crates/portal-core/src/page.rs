//! Page results.

use serde::Serialize;

use crate::character::Character;
use crate::types::PageCursor;

/// One page of a character listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageResult {
    /// The characters in this page, in API order.
    pub items: Vec<Character>,

    /// Cursor for the next page, if more pages exist.
    pub next: Option<PageCursor>,

    /// Total number of characters matching the listing, when reported.
    pub count: Option<u32>,

    /// Total number of pages in the listing, when reported.
    pub pages: Option<u32>,
}

impl PageResult {
    /// The empty, terminal page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no further pages exist.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
