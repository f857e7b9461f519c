//! Configuration types for the search backend.

use std::time::Duration;

use geo_enricher_shared::LocationTypeSet;
use serde_json::Value;

/// Connection and traversal settings for the search backend.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchEngineConfig {
    /// Host name of the search engine.
    pub host: String,
    /// Port of the search engine.
    pub port: u16,
    /// URL scheme, `http` or `https`.
    pub scheme: String,
    /// Per-request timeout. Bulk writes of a full page can be slow.
    pub timeout: Duration,
    /// Index the documents are read from.
    pub source_index: String,
    /// Index the enriched copies are written to. Must not exist before the run.
    pub destination_index: String,
    /// Optional document-kind label written in each bulk directive.
    pub document_type: Option<String>,
    /// Number of hits per scroll page.
    pub page_size: usize,
    /// How long the cursor is kept alive between pages.
    pub scroll_lifetime: String,
    /// Category labels that make a document eligible for geocoding.
    pub location_types: LocationTypeSet,
    /// Overrides the server-side filter query. When `None`, a `terms` query
    /// on `types` over [`Self::location_types`] is used.
    pub filter_query: Option<Value>,
    /// Primary shard count of the destination index.
    pub shards: u32,
    /// Replica count of the destination index.
    pub replicas: u32,
}

impl Default for SearchEngineConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
            scheme: "http".to_string(),
            timeout: Duration::from_secs(1000),
            source_index: "kb-clean".to_string(),
            destination_index: "kb-clean-g".to_string(),
            document_type: None,
            page_size: 1000,
            scroll_lifetime: "2m".to_string(),
            location_types: LocationTypeSet::default(),
            filter_query: None,
            shards: 3,
            replicas: 0,
        }
    }
}

impl SearchEngineConfig {
    /// The base URL of the search engine, e.g. `http://localhost:9200`.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// The search body used to open the scroll.
    pub fn scroll_query(&self) -> Value {
        self.filter_query
            .clone()
            .unwrap_or_else(|| self.location_types.to_terms_query())
    }
}
