//! Source index trait definition.
//!
//! This module defines the read side of the search backend: index existence
//! checks and scroll-based traversal of a query's full result set.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{ScrollPage, ScrollRequest};

/// Abstracts paginated reads from the underlying search index.
///
/// A traversal opens a scroll cursor with [`SourceIndex::open_scroll`], then calls
/// [`SourceIndex::next_page`] with the most recent cursor until a page comes
/// back empty. Each response may carry a refreshed cursor that replaces the
/// previous one.
#[async_trait]
pub trait SourceIndex: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(SearchIndexError)` - If the backend could not be reached
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Run the initial query and open a scroll cursor.
    ///
    /// # Arguments
    ///
    /// * `request` - Index, page size, cursor lifetime and filter query
    ///
    /// # Returns
    ///
    /// * `Ok(ScrollPage)` - The first page and the cursor for the next one
    /// * `Err(SearchIndexError)` - If the search fails
    async fn open_scroll(&self, request: &ScrollRequest) -> Result<ScrollPage, SearchIndexError>;

    /// Fetch the page following `scroll_id`, keeping the cursor alive for
    /// `scroll_lifetime` (e.g. `"2m"`).
    ///
    /// An empty page signals the end of the traversal.
    async fn next_page(
        &self,
        scroll_id: &str,
        scroll_lifetime: &str,
    ) -> Result<ScrollPage, SearchIndexError>;

    /// Release the server-side cursor.
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchIndexError>;
}
