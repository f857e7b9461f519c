//! # Geo Enricher
//!
//! Geo enricher for the knowledge base - scrolls through a source index,
//! geocodes documents that describe places and bulk-writes enriched copies
//! into a destination index.
//!
//! ## Architecture
//!
//! The enricher follows a Scanner-Processor-Loader pattern:
//!
//! 1. **Scanner**: Pages through the source index with a scroll cursor
//! 2. **Processor**: Geocodes eligible documents and builds bulk payloads
//! 3. **Loader**: Bulk-writes payloads into the destination index
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`geocoder`]: Place name resolution via GeoNames
//! - [`processor`]: Per-document enrichment and per-page batching
//! - [`loader`]: Writes payloads into the destination index
//! - [`scanner`]: Drives the traversal of the source index
//! - [`errors`]: Error types for the pipeline

pub mod config;
pub mod errors;
pub mod geocoder;
pub mod loader;
pub mod processor;
pub mod scanner;

pub use config::Dependencies;
pub use errors::EnrichError;

use thiserror::Error;

/// Errors that can occur during enricher initialization or execution.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Enrichment error.
    #[error("Enrich error: {0}")]
    Enrich(#[from] EnrichError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
