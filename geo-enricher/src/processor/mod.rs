//! Processor module for the geo enricher pipeline.
//!
//! Enriches source documents with geolocation records and batches them into
//! bulk payloads.

mod batch_processor;
mod document_enricher;

pub use batch_processor::{BatchProcessor, ProcessedBatch};
pub use document_enricher::{DocumentEnricher, EnrichedDocument};
