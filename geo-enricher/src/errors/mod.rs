//! Error types for the geo enricher pipeline.

use geo_enricher_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur while enriching the source index.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Fatal setup failure: no connection, missing source or existing destination.
    #[error("Setup error: {0}")]
    SetupError(String),

    /// Error reading pages from the source index.
    #[error("Scan error: {0}")]
    ScanError(String),

    /// Error from the loader component.
    #[error("Loader error: {0}")]
    LoaderError(String),
}

impl EnrichError {
    /// Create a setup error.
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::SetupError(msg.into())
    }

    /// Create a scan error.
    pub fn scan(msg: impl Into<String>) -> Self {
        Self::ScanError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}

impl From<SearchIndexError> for EnrichError {
    fn from(err: SearchIndexError) -> Self {
        match err {
            SearchIndexError::ConnectionError(_)
            | SearchIndexError::IndexNotFound(_)
            | SearchIndexError::IndexAlreadyExists(_)
            | SearchIndexError::IndexCreationError(_) => Self::SetupError(err.to_string()),
            SearchIndexError::BulkIndexError(_) => Self::LoaderError(err.to_string()),
            SearchIndexError::SearchError(_)
            | SearchIndexError::ScrollError(_)
            | SearchIndexError::ParseError(_) => Self::ScanError(err.to_string()),
        }
    }
}
