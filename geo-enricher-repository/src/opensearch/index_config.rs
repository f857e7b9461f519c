//! OpenSearch index configuration and mappings.
//!
//! This module defines the settings and mappings of the destination index that
//! receives the enriched documents.

use serde_json::{json, Value};

/// Configuration for the destination index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The destination index name.
    pub name: String,
    /// Number of primary shards.
    pub shards: u32,
    /// Number of replicas.
    pub replicas: u32,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `name` - The destination index name
    /// * `shards` - Number of primary shards
    /// * `replicas` - Number of replicas
    pub fn new(name: impl Into<String>, shards: u32, replicas: u32) -> Self {
        Self {
            name: name.into(),
            shards,
            replicas,
        }
    }

    /// Get the index settings and mappings for the destination index.
    ///
    /// The configuration includes:
    /// - **Keyword fields**: knowledge-base attributes copied from the source documents,
    ///   stored unanalyzed for exact filtering
    /// - **long**: the `x` and `y` layout coordinates
    /// - **geolocation**: the geohash as a keyword plus `lat`/`lon` as doubles
    pub fn index_body(&self) -> Value {
        json!({
            "settings": {
                "index": {
                    "number_of_shards": self.shards,
                    "number_of_replicas": self.replicas
                }
            },
            "mappings": {
                "properties": {
                    "categories": { "type": "keyword" },
                    "docIds": { "type": "keyword" },
                    "edgeLabel": { "type": "keyword" },
                    "edgeTarget": { "type": "keyword" },
                    "hypotheses": { "type": "keyword" },
                    "kbid": { "type": "keyword" },
                    "name": { "type": "keyword" },
                    "types": { "type": "keyword" },
                    "x": { "type": "long" },
                    "y": { "type": "long" },
                    "geolocation": {
                        "properties": {
                            "geohash": { "type": "keyword" },
                            "lat": { "type": "double" },
                            "lon": { "type": "double" }
                        }
                    }
                }
            }
        })
    }
}
