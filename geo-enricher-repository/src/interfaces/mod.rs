//! Interface definitions for the search backend.
//!
//! The enricher reads from one index and writes to another. The read side
//! (`SourceIndex`) and the write side (`IndexWriter`) are separate traits so the
//! pipeline can be tested against in-memory implementations of either.

mod index_writer;
mod source_index;

pub use index_writer::IndexWriter;
pub use source_index::SourceIndex;
