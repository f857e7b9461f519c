//! This module defines the core data structures used across the geo enricher.
//! It re-exports the document, geolocation and bulk payload types.

pub mod bulk_payload;
pub mod geolocation;
pub mod source_document;

pub use bulk_payload::{BulkOperation, BulkPayload, WriteDirective};
pub use geolocation::{Coordinate, GeocodedPoint, Geolocation};
pub use source_document::{LocationTypeSet, SourceDocument};
