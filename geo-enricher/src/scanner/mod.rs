//! Scanner module for the geo enricher pipeline.
//!
//! Drives the traversal of the source index and coordinates the processor and
//! loader components.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::EnrichError;
use crate::loader::BulkLoader;
use crate::processor::BatchProcessor;
use geo_enricher_repository::{ScrollPage, ScrollRequest, SourceIndex};

/// Running totals for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Documents that received a resolved geolocation.
    pub enriched: usize,
    /// Pages fetched, including the terminating empty page.
    pub pages: usize,
    /// Documents the destination index accepted.
    pub documents_written: usize,
    /// Bulk requests issued.
    pub bulk_requests: usize,
    /// Documents the destination index rejected.
    pub bulk_item_failures: usize,
}

/// Traversal state.
///
/// `Exhausted` is terminal.
#[derive(Debug)]
pub enum ScanState {
    /// No cursor has been opened yet.
    Unopened,
    /// Holding the current page and the cursor for the next one.
    Scanning { scroll_id: String, page: ScrollPage },
    /// An empty page was reached.
    Exhausted,
}

/// Scanner that pages through the source index and enriches every page.
///
/// The scanner:
/// - Verifies the source index exists before querying it
/// - Opens a scroll cursor with the configured page size, lifetime and query
/// - Processes and writes one page at a time, in order
/// - Releases the cursor once the traversal is exhausted or a page fails
pub struct IndexScanner {
    source: Arc<dyn SourceIndex>,
    processor: BatchProcessor,
    loader: BulkLoader,
    request: ScrollRequest,
}

impl IndexScanner {
    /// Create a new scanner with the given components.
    pub fn new(
        source: Arc<dyn SourceIndex>,
        processor: BatchProcessor,
        loader: BulkLoader,
        request: ScrollRequest,
    ) -> Self {
        Self {
            source,
            processor,
            loader,
            request,
        }
    }

    /// Run the traversal to completion.
    ///
    /// The first page is processed before the termination check, so a source
    /// with no matching documents still issues exactly one query.
    ///
    /// # Returns
    ///
    /// * `Ok(RunTotals)` - The totals once the source is exhausted
    /// * `Err(EnrichError::SetupError)` - If the source index does not exist
    /// * `Err(EnrichError)` - If a page cannot be fetched or written
    #[instrument(skip(self), fields(source_index = %self.request.index))]
    pub async fn run(&self) -> Result<RunTotals, EnrichError> {
        info!(destination_index = %self.loader.index(), "Starting index scan");

        let mut totals = RunTotals::default();
        let mut state = ScanState::Unopened;

        loop {
            state = match state {
                ScanState::Unopened => self.open(&mut totals).await?,
                ScanState::Scanning { scroll_id, page } => {
                    self.step(scroll_id, page, &mut totals).await?
                }
                ScanState::Exhausted => break,
            };
        }

        info!(
            enriched = totals.enriched,
            pages = totals.pages,
            documents_written = totals.documents_written,
            bulk_requests = totals.bulk_requests,
            bulk_item_failures = totals.bulk_item_failures,
            "Index scan complete"
        );
        Ok(totals)
    }

    /// Check the source index and fetch the first page.
    async fn open(&self, totals: &mut RunTotals) -> Result<ScanState, EnrichError> {
        if !self.source.index_exists(&self.request.index).await? {
            return Err(EnrichError::setup(format!(
                "Source index {} does not exist",
                self.request.index
            )));
        }

        let page = self.source.open_scroll(&self.request).await.map_err(|e| {
            EnrichError::scan(format!(
                "Failed to open scroll on {}: {}",
                self.request.index, e
            ))
        })?;
        totals.pages += 1;

        info!(
            total_hits = page.total_hits.unwrap_or(page.len() as u64),
            page_size = self.request.page_size,
            "Found results"
        );

        Ok(ScanState::Scanning {
            scroll_id: page.scroll_id.clone(),
            page,
        })
    }

    /// Process and write the current page, then fetch the next one.
    async fn step(
        &self,
        scroll_id: String,
        page: ScrollPage,
        totals: &mut RunTotals,
    ) -> Result<ScanState, EnrichError> {
        let exhausted = page.is_empty();

        let batch = self.processor.process_batch(page.hits).await;
        if !batch.is_empty() {
            let summary = match self.loader.load(&batch.payload).await {
                Ok(summary) => summary,
                Err(e) => {
                    self.release(&scroll_id).await;
                    return Err(e);
                }
            };
            totals.bulk_requests += 1;
            totals.documents_written += summary.succeeded;
            totals.bulk_item_failures += summary.failed;
            totals.enriched += batch.enriched_count;

            info!(
                documents = batch.payload.len(),
                enriched = batch.enriched_count,
                total_enriched = totals.enriched,
                "Page written"
            );
        }

        if exhausted {
            self.release(&scroll_id).await;
            return Ok(ScanState::Exhausted);
        }

        let next = match self
            .source
            .next_page(&scroll_id, &self.request.scroll_lifetime)
            .await
        {
            Ok(next) => next,
            Err(e) => {
                self.release(&scroll_id).await;
                return Err(EnrichError::scan(format!("Failed to fetch next page: {}", e)));
            }
        };
        totals.pages += 1;
        debug!(hits = next.len(), pages = totals.pages, "Fetched next page");

        // The refreshed cursor replaces the old one.
        Ok(ScanState::Scanning {
            scroll_id: next.scroll_id.clone(),
            page: next,
        })
    }

    /// Best-effort release of the server-side cursor.
    async fn release(&self, scroll_id: &str) {
        if scroll_id.is_empty() {
            return;
        }
        if let Err(e) = self.source.clear_scroll(scroll_id).await {
            warn!(error = %e, "Failed to clear scroll cursor");
        }
    }
}
