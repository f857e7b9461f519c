//! Per-document enrichment.
//!
//! Decides whether a source document describes a place, resolves its name and
//! attaches the resulting geolocation record.

use std::sync::Arc;

use geo_enricher_shared::geohash::DEFAULT_PRECISION;
use geo_enricher_shared::types::geolocation::GEOLOCATION_FIELD;
use geo_enricher_shared::{BulkOperation, Geolocation, LocationTypeSet, SourceDocument, WriteDirective};
use tracing::debug;

use crate::geocoder::GeocodeResolver;

/// The output record for one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedDocument {
    /// Write directive and (possibly modified) body.
    pub operation: BulkOperation,
    /// Whether a geolocation was resolved and attached.
    pub enriched: bool,
}

/// Enricher that attaches geolocation records to source documents.
///
/// For every document:
/// - not a place (no `types` label in the eligible set): attach an empty
///   `geolocation` marker
/// - a place without a name: pass through unchanged, no lookup
/// - a place with a name the geocoder resolves: attach geohash and degrees
/// - a place with a name the geocoder cannot resolve: pass through unchanged
pub struct DocumentEnricher {
    resolver: Arc<dyn GeocodeResolver>,
    location_types: LocationTypeSet,
    directive: WriteDirective,
}

impl DocumentEnricher {
    /// Create a new enricher.
    ///
    /// # Arguments
    ///
    /// * `resolver` - The geocoder used for eligible, named documents
    /// * `location_types` - Labels that mark a document as a place
    /// * `directive` - The write directive emitted for every document
    pub fn new(
        resolver: Arc<dyn GeocodeResolver>,
        location_types: LocationTypeSet,
        directive: WriteDirective,
    ) -> Self {
        Self {
            resolver,
            location_types,
            directive,
        }
    }

    /// Enrich a single document. Always yields exactly one record.
    pub async fn enrich(&self, doc: SourceDocument) -> EnrichedDocument {
        let enriched = if self.location_types.is_eligible(&doc) {
            self.geolocate(&doc).await
        } else {
            Some(Geolocation::empty())
        };

        let resolved = matches!(enriched, Some(ref geo) if !geo.is_empty());
        let mut body = doc.into_source();
        if let Some(geolocation) = enriched {
            body.insert(GEOLOCATION_FIELD.to_string(), geolocation.to_value());
        }

        EnrichedDocument {
            operation: BulkOperation::new(self.directive.clone(), body),
            enriched: resolved,
        }
    }

    /// Look up an eligible document. `None` leaves the body untouched.
    async fn geolocate(&self, doc: &SourceDocument) -> Option<Geolocation> {
        let Some(name) = doc.name() else {
            debug!(id = ?doc.id, "Place has no name, skipping lookup");
            return None;
        };

        let point = self.resolver.resolve(name).await?;
        Some(Geolocation::from_point(&point, DEFAULT_PRECISION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoder::MockGeocoder;
    use geo_enricher_shared::{geohash, Coordinate, GeocodedPoint};
    use serde_json::json;

    const PARIS: Coordinate = Coordinate {
        lat: 48.8566,
        lon: 2.3522,
    };

    fn enricher(geocoder: Arc<MockGeocoder>) -> DocumentEnricher {
        DocumentEnricher::new(
            geocoder,
            LocationTypeSet::default(),
            WriteDirective::new("kb-clean-g", None),
        )
    }

    #[tokio::test]
    async fn test_eligible_named_resolved() {
        let geocoder = Arc::new(MockGeocoder::new().with_place("Paris", PARIS));
        let doc = SourceDocument::from_value(json!({"name": "Paris", "types": ["Location"], "kbid": "k1"}));

        let result = enricher(geocoder.clone()).enrich(doc).await;

        assert!(result.enriched);
        assert_eq!(result.operation.header, WriteDirective::new("kb-clean-g", None));
        assert_eq!(result.operation.body["kbid"], "k1");
        assert_eq!(
            result.operation.body["geolocation"],
            json!({
                "geohash": geohash::encode(PARIS, 8),
                "lat": "48.8566",
                "lon": "2.3522"
            })
        );
        assert_eq!(geocoder.lookups(), vec!["Paris"]);
    }

    #[tokio::test]
    async fn test_resolved_degrees_are_written_as_returned() {
        let london = GeocodedPoint::parse("51.50000", "-0.12570").unwrap();
        let geocoder = Arc::new(MockGeocoder::new().with_place("London", london.clone()));
        let doc = SourceDocument::from_value(json!({"name": "London", "types": ["GeopoliticalEntity"]}));

        let result = enricher(geocoder).enrich(doc).await;

        let geo = &result.operation.body["geolocation"];
        assert_eq!(geo["lat"], "51.50000");
        assert_eq!(geo["lon"], "-0.12570");
        assert_eq!(geo["geohash"], geohash::encode(london.coord, 8));
    }

    #[tokio::test]
    async fn test_not_eligible_gets_empty_marker() {
        let geocoder = Arc::new(MockGeocoder::new().with_place("Widget", PARIS));
        let doc = SourceDocument::from_value(json!({"name": "Widget", "types": ["Product"]}));

        let result = enricher(geocoder.clone()).enrich(doc).await;

        assert!(!result.enriched);
        assert_eq!(result.operation.body["geolocation"], json!({}));
        assert_eq!(geocoder.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_eligible_without_name_passes_through() {
        let geocoder = Arc::new(MockGeocoder::new());
        let source = json!({"name": null, "types": ["Facility"], "x": 3});
        let doc = SourceDocument::from_value(source.clone());

        let result = enricher(geocoder.clone()).enrich(doc).await;

        assert!(!result.enriched);
        assert_eq!(serde_json::Value::Object(result.operation.body), source);
        assert_eq!(geocoder.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_eligible_not_found_passes_through() {
        let geocoder = Arc::new(MockGeocoder::new());
        let doc = SourceDocument::from_value(json!({"name": "Atlantis", "types": ["Location"]}));

        let result = enricher(geocoder.clone()).enrich(doc).await;

        assert!(!result.enriched);
        assert!(!result.operation.body.contains_key("geolocation"));
        assert_eq!(geocoder.lookups(), vec!["Atlantis"]);
    }

    #[tokio::test]
    async fn test_directive_carries_document_type() {
        let enricher = DocumentEnricher::new(
            Arc::new(MockGeocoder::new()),
            LocationTypeSet::default(),
            WriteDirective::new("kb-clean-g", Some("kb-clean".to_string())),
        );

        let result = enricher
            .enrich(SourceDocument::from_value(json!({"types": []})))
            .await;

        assert_eq!(
            result.operation.header.document_type.as_deref(),
            Some("kb-clean")
        );
    }
}
