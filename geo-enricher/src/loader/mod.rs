//! Loader module for the geo enricher pipeline.
//!
//! Writes processed pages into the destination index with one bulk request
//! per page.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::errors::EnrichError;
use geo_enricher_repository::{BulkWriteSummary, IndexWriter};
use geo_enricher_shared::BulkPayload;

/// Loader that bulk-writes payloads into the destination index.
///
/// A rejected request stops the run; documents the engine rejects inside an
/// accepted request are logged and counted but do not.
pub struct BulkLoader {
    writer: Arc<dyn IndexWriter>,
    index: String,
}

impl BulkLoader {
    /// Create a new loader writing into `index`.
    pub fn new(writer: Arc<dyn IndexWriter>, index: impl Into<String>) -> Self {
        Self {
            writer,
            index: index.into(),
        }
    }

    /// The destination index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Write a payload.
    ///
    /// An empty payload issues no request and returns an empty summary.
    #[instrument(skip(self, payload), fields(documents = payload.len()))]
    pub async fn load(&self, payload: &BulkPayload) -> Result<BulkWriteSummary, EnrichError> {
        if payload.is_empty() {
            debug!("No documents to write");
            return Ok(BulkWriteSummary::default());
        }

        match self.writer.bulk_write(&self.index, payload).await {
            Ok(summary) => {
                if summary.has_failures() {
                    warn!(
                        succeeded = summary.succeeded,
                        failed = summary.failed,
                        "Bulk write completed with some failures"
                    );
                } else {
                    debug!(count = summary.succeeded, "Successfully wrote all documents");
                }
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, count = payload.len(), "Failed to bulk write documents");
                Err(EnrichError::loader(format!(
                    "Failed to bulk write {} documents: {}",
                    payload.len(),
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use geo_enricher_repository::{BulkItemFailure, SearchIndexError};
    use geo_enricher_shared::{BulkOperation, WriteDirective};
    use serde_json::{Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock writer for testing.
    struct MockWriter {
        bulk_calls: AtomicUsize,
        reject_positions: Vec<usize>,
        fail_request: bool,
    }

    impl MockWriter {
        fn new() -> Self {
            Self {
                bulk_calls: AtomicUsize::new(0),
                reject_positions: Vec::new(),
                fail_request: false,
            }
        }
    }

    #[async_trait]
    impl IndexWriter for MockWriter {
        async fn create_index(&self, _index: &str, _body: &Value) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn bulk_write(
            &self,
            _index: &str,
            payload: &BulkPayload,
        ) -> Result<BulkWriteSummary, SearchIndexError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_request {
                return Err(SearchIndexError::bulk_index("status 413"));
            }
            let failures: Vec<_> = self
                .reject_positions
                .iter()
                .map(|&position| BulkItemFailure {
                    position,
                    status: 400,
                    reason: "mapper_parsing_exception".to_string(),
                })
                .collect();
            Ok(BulkWriteSummary {
                total: payload.len(),
                succeeded: payload.len() - failures.len(),
                failed: failures.len(),
                failures,
            })
        }
    }

    fn payload(count: usize) -> BulkPayload {
        (0..count)
            .map(|_| BulkOperation::new(WriteDirective::new("dest", None), Map::new()))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_payload_is_skipped() {
        let writer = Arc::new(MockWriter::new());
        let loader = BulkLoader::new(writer.clone(), "dest");

        let summary = loader.load(&BulkPayload::new()).await.unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(writer.bulk_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load() {
        let writer = Arc::new(MockWriter::new());
        let loader = BulkLoader::new(writer.clone(), "dest");

        let summary = loader.load(&payload(3)).await.unwrap();

        assert_eq!(summary, BulkWriteSummary::all_succeeded(3));
        assert_eq!(writer.bulk_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_item_failures_do_not_fail_the_load() {
        let writer = Arc::new(MockWriter {
            reject_positions: vec![1],
            ..MockWriter::new()
        });
        let loader = BulkLoader::new(writer, "dest");

        let summary = loader.load(&payload(3)).await.unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_request_failure_is_loader_error() {
        let writer = Arc::new(MockWriter {
            fail_request: true,
            ..MockWriter::new()
        });
        let loader = BulkLoader::new(writer, "dest");

        let result = loader.load(&payload(2)).await;

        assert!(matches!(result, Err(EnrichError::LoaderError(_))));
    }
}
