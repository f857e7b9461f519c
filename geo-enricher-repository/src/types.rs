//! Request and response types for search index operations.

use geo_enricher_shared::SourceDocument;
use serde_json::Value;

/// Parameters of the initial scroll search.
#[derive(Debug, Clone)]
pub struct ScrollRequest {
    /// The index to search.
    pub index: String,
    /// Number of hits per page.
    pub page_size: usize,
    /// How long the engine keeps the cursor alive between requests (e.g. `"2m"`).
    pub scroll_lifetime: String,
    /// The search body, typically `{"query": {...}}`.
    pub query: Value,
}

/// One page of a scroll traversal.
#[derive(Debug, Clone, Default)]
pub struct ScrollPage {
    /// Cursor for the next page. Replaces any previously held cursor.
    pub scroll_id: String,
    /// The hits in engine order.
    pub hits: Vec<SourceDocument>,
    /// Total number of matching documents, when the engine reports it.
    pub total_hits: Option<u64>,
}

impl ScrollPage {
    /// An empty page ends the traversal.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// A bulk item the engine rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemFailure {
    /// Position of the document within the payload.
    pub position: usize,
    /// HTTP status reported for the item.
    pub status: u16,
    /// The engine's reason, or the raw error object when it has none.
    pub reason: String,
}

/// Summary of a bulk write containing aggregate counts and item failures.
///
/// A bulk request can be accepted while individual documents inside it are
/// rejected; this summary lets callers report those partial failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkWriteSummary {
    /// Number of documents sent.
    pub total: usize,
    /// Number of documents the engine accepted.
    pub succeeded: usize,
    /// Number of documents the engine rejected.
    pub failed: usize,
    /// Details for each rejected document.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkWriteSummary {
    /// A summary where every document was accepted.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total,
            succeeded: total,
            failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
