//! Batch processor implementation.
//!
//! Turns one page of source documents into a bulk payload for the destination
//! index.

use geo_enricher_shared::{BulkPayload, SourceDocument};
use tracing::{debug, instrument};

use super::document_enricher::DocumentEnricher;

/// Result of processing one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedBatch {
    /// One operation per input document, in page order.
    pub payload: BulkPayload,
    /// Number of documents that received a resolved geolocation.
    pub enriched_count: usize,
}

impl ProcessedBatch {
    /// An empty batch must not be written.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Processor that enriches a page of documents, one at a time.
pub struct BatchProcessor {
    enricher: DocumentEnricher,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(enricher: DocumentEnricher) -> Self {
        Self { enricher }
    }

    /// Process a page of hits.
    ///
    /// Documents are enriched sequentially, in order.
    ///
    /// # Arguments
    ///
    /// * `hits` - The page of source documents
    ///
    /// # Returns
    ///
    /// The bulk payload for the page and the number of documents geolocated.
    #[instrument(skip(self, hits), fields(hit_count = hits.len()))]
    pub async fn process_batch(&self, hits: Vec<SourceDocument>) -> ProcessedBatch {
        let mut payload = BulkPayload::with_capacity(hits.len());
        let mut enriched_count = 0;

        for doc in hits {
            let result = self.enricher.enrich(doc).await;
            if result.enriched {
                enriched_count += 1;
            }
            payload.push(result.operation);
        }

        debug!(
            documents = payload.len(),
            enriched = enriched_count,
            "Processed page"
        );
        ProcessedBatch {
            payload,
            enriched_count,
        }
    }
}
