//! Source document types.
//!
//! A source document is a search hit read from the source index. Its body is
//! kept as an opaque JSON mapping: the enricher only ever reads the `name` and
//! `types` fields and copies everything else through untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Field holding the document's display name.
pub const NAME_FIELD: &str = "name";

/// Field holding the document's semantic categories.
pub const TYPES_FIELD: &str = "types";

/// Category labels treated as places when no explicit set is configured.
pub const DEFAULT_LOCATION_TYPES: [&str; 4] = [
    "Location",
    "Facility",
    "GeopoliticalEntity",
    "Physical.OrganizationLocationOrigin",
];

/// A document read from the source index.
///
/// Deserializes directly from a search hit (`{"_id": ..., "_source": {...}}`);
/// hit metadata other than the id is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// The hit's document id in the source index, when the engine returned one.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The document body.
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl SourceDocument {
    /// Create a document from a body with no id.
    pub fn new(source: Map<String, Value>) -> Self {
        Self { id: None, source }
    }

    /// Create a document from a JSON value. Anything other than an object
    /// yields an empty body.
    ///
    /// # Example
    ///
    /// ```
    /// use geo_enricher_shared::SourceDocument;
    /// use serde_json::json;
    ///
    /// let doc = SourceDocument::from_value(json!({"name": "Paris", "types": ["Location"]}));
    /// assert_eq!(doc.name(), Some("Paris"));
    ///
    /// let doc = SourceDocument::from_value(json!(["not", "an", "object"]));
    /// assert!(doc.source.is_empty());
    /// ```
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(source) => Self::new(source),
            _ => Self::default(),
        }
    }

    /// The display name, if present and not blank.
    ///
    /// A `null` name, a non-string name and an all-whitespace name all count as absent.
    pub fn name(&self) -> Option<&str> {
        self.source
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// The document's category labels.
    ///
    /// Accepts both an array of strings and a single string; non-string entries
    /// are skipped.
    pub fn types(&self) -> Vec<&str> {
        match self.source.get(TYPES_FIELD) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(value)) => vec![value.as_str()],
            _ => Vec::new(),
        }
    }

    /// Consume the document and return its body.
    pub fn into_source(self) -> Map<String, Value> {
        self.source
    }
}

/// The configured set of category labels that make a document eligible for
/// geocoding.
///
/// A document is eligible iff at least one of its `types` is in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTypeSet {
    labels: BTreeSet<String>,
}

impl LocationTypeSet {
    /// Build a set from labels. Blank labels are dropped and the rest trimmed.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
        Self { labels }
    }

    /// Parse a comma-separated list such as `Location,Facility`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Whether `label` is one of the eligible labels.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Whether the document's `types` intersect this set.
    pub fn is_eligible(&self, doc: &SourceDocument) -> bool {
        doc.types().into_iter().any(|label| self.contains(label))
    }

    /// Iterate over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The filter query selecting documents with any of these labels.
    ///
    /// Used as the scan query when no explicit filter query is configured.
    pub fn to_terms_query(&self) -> Value {
        let labels: Vec<&str> = self.iter().collect();
        json!({
            "query": {
                "terms": {
                    "types": labels
                }
            }
        })
    }
}

impl Default for LocationTypeSet {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION_TYPES)
    }
}
