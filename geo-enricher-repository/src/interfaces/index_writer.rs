//! Index writer trait definition.

use async_trait::async_trait;
use geo_enricher_shared::BulkPayload;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::BulkWriteSummary;

/// Abstracts writes to the destination index.
#[async_trait]
pub trait IndexWriter: Send + Sync {
    /// Create an index with the given settings and mappings.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchIndexError::IndexAlreadyExists)` - If an index with this name exists
    /// * `Err(SearchIndexError)` - If creation fails
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError>;

    /// Write a payload with a single bulk request.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkWriteSummary)` - Per-item outcome counts; item failures do not
    ///   turn into an `Err`
    /// * `Err(SearchIndexError)` - If the request as a whole failed
    async fn bulk_write(
        &self,
        index: &str,
        payload: &BulkPayload,
    ) -> Result<BulkWriteSummary, SearchIndexError>;
}
