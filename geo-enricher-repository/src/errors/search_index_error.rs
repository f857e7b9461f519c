//! Search index error types.
//!
//! This module defines the unified error type for all search index operations,
//! from transport failures to index lifecycle conflicts.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Used by the `SourceIndex` and `IndexWriter` traits for every backend call.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish or use a connection to the search backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The named index does not exist.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// The named index already exists and must not be overwritten.
    #[error("Index already exists: {0}")]
    IndexAlreadyExists(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The initial search request failed.
    #[error("Search error: {0}")]
    SearchError(String),

    /// A scroll continuation or release request failed.
    #[error("Scroll error: {0}")]
    ScrollError(String),

    /// A bulk write request failed as a whole.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to parse a response from the search backend.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index not found error.
    pub fn index_not_found(index: impl Into<String>) -> Self {
        Self::IndexNotFound(index.into())
    }

    /// Create an index already exists error.
    pub fn index_already_exists(index: impl Into<String>) -> Self {
        Self::IndexAlreadyExists(index.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a scroll error.
    pub fn scroll(msg: impl Into<String>) -> Self {
        Self::ScrollError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
