//! # Geo Enricher Shared
//!
//! This crate defines the data structures shared across the geo enricher:
//! source documents read from the search index, the eligibility type set,
//! resolved coordinates and their geolocation records, the bulk payload
//! written back to the destination index, and the geohash encoder.

pub mod geohash;
pub mod types;

pub use types::bulk_payload::{BulkOperation, BulkPayload, WriteDirective};
pub use types::geolocation::{Coordinate, GeocodedPoint, Geolocation};
pub use types::source_document::{LocationTypeSet, SourceDocument};
