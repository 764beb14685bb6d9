//! Catalog source trait.

use async_trait::async_trait;

use crate::page::PageResult;
use crate::types::PageCursor;
use crate::Result;

/// A paginated, name-searchable character catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of characters.
    ///
    /// - no query and no cursor: first page of the unfiltered listing
    /// - a non-empty query and no cursor: first page filtered by name
    /// - a cursor: exactly that page; the query is ignored because the
    ///   cursor already encodes it
    ///
    /// A filtered search with no matches yields an empty page without a
    /// cursor rather than an error.
    async fn fetch_page(
        &self,
        query: Option<&str>,
        cursor: Option<&PageCursor>,
    ) -> Result<PageResult>;
}
