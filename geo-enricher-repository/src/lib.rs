//! # Geo Enricher Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search backend. It includes definitions for errors, the read and write
//! interfaces, and a concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;
pub mod utils;

pub use config::SearchEngineConfig;
pub use errors::SearchIndexError;
pub use interfaces::{IndexWriter, SourceIndex};
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use types::{BulkItemFailure, BulkWriteSummary, ScrollPage, ScrollRequest};
pub use utils::{parse_scroll_page, summarize_bulk_response};
