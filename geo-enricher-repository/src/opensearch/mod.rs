//! OpenSearch implementation of the search backend.
//!
//! This module provides a concrete implementation of `SourceIndex` and
//! `IndexWriter` using OpenSearch as the backend.

mod index_config;
mod provider;

pub use index_config::IndexConfig;
pub use provider::OpenSearchProvider;
