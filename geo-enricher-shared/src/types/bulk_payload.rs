//! Bulk write payload types.
//!
//! A page of enriched documents is held as an ordered list of
//! `(directive, body)` pairs. The provider turns it into request lines with
//! [`BulkPayload::to_lines`] when the page is written.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The `index` directive preceding each document in a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteDirective {
    /// Destination index name.
    #[serde(rename = "_index")]
    pub index: String,
    /// Optional document-kind label. Only engines that still support mapping
    /// types accept it.
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
}

impl WriteDirective {
    pub fn new(index: impl Into<String>, document_type: Option<String>) -> Self {
        Self {
            index: index.into(),
            document_type,
        }
    }

    /// The directive line as sent to the engine: `{"index": {"_index": ...}}`.
    pub fn to_value(&self) -> Value {
        json!({ "index": self })
    }
}

/// One document's header and body.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOperation {
    pub header: WriteDirective,
    pub body: Map<String, Value>,
}

impl BulkOperation {
    pub fn new(header: WriteDirective, body: Map<String, Value>) -> Self {
        Self { header, body }
    }
}

/// The ordered bulk operations produced from one page of source documents.
///
/// Every operation carries exactly one header and one body, so the header and
/// body counts are equal by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkPayload {
    operations: Vec<BulkOperation>,
}

impl BulkPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Append an operation, preserving insertion order.
    pub fn push(&mut self, operation: BulkOperation) {
        self.operations.push(operation);
    }

    /// Number of documents in the payload.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// An empty payload means there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[BulkOperation] {
        &self.operations
    }

    /// The request lines in wire order: header, body, header, body, ...
    pub fn to_lines(&self) -> Vec<Value> {
        let mut lines = Vec::with_capacity(self.operations.len() * 2);
        for operation in &self.operations {
            lines.push(operation.header.to_value());
            lines.push(Value::Object(operation.body.clone()));
        }
        lines
    }
}

impl FromIterator<BulkOperation> for BulkPayload {
    fn from_iter<T: IntoIterator<Item = BulkOperation>>(iter: T) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}
