//! Mock geocoder for testing and local development.
//!
//! The `MockGeocoder` can be pre-populated with name → coordinate mappings,
//! allowing tests to run without network access. Every lookup is recorded.
//!
//! # Example
//!
//! ```ignore
//! use geo_enricher::geocoder::{GeocodeResolver, MockGeocoder};
//! use geo_enricher_shared::Coordinate;
//!
//! let geocoder = MockGeocoder::new().with_place("Paris", Coordinate::new(48.8566, 2.3522));
//! assert!(geocoder.resolve("Paris").await.is_some());
//! assert_eq!(geocoder.lookups(), vec!["Paris".to_string()]);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use geo_enricher_shared::GeocodedPoint;

use super::GeocodeResolver;

/// Mock geocoder that returns pre-configured coordinates.
#[derive(Default)]
pub struct MockGeocoder {
    places: HashMap<String, GeocodedPoint>,
    lookups: Mutex<Vec<String>>,
}

impl MockGeocoder {
    /// Create a new mock that knows no places.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a point to be returned for `name`.
    pub fn with_place(mut self, name: impl Into<String>, point: impl Into<GeocodedPoint>) -> Self {
        self.places.insert(name.into(), point.into());
        self
    }

    /// Names looked up so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups
            .lock()
            .map(|lookups| lookups.clone())
            .unwrap_or_default()
    }

    /// Number of lookups so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().map(|lookups| lookups.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GeocodeResolver for MockGeocoder {
    async fn resolve(&self, name: &str) -> Option<GeocodedPoint> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(name.to_string());
        }
        self.places.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_enricher_shared::Coordinate;

    #[tokio::test]
    async fn test_known_and_unknown_places() {
        let geocoder = MockGeocoder::new().with_place("Paris", Coordinate::new(48.8566, 2.3522));

        assert_eq!(
            geocoder.resolve("Paris").await.map(|point| point.coord),
            Some(Coordinate::new(48.8566, 2.3522))
        );
        assert_eq!(geocoder.resolve("Atlantis").await, None);
        assert_eq!(geocoder.lookups(), vec!["Paris", "Atlantis"]);
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_not_cached() {
        let geocoder = MockGeocoder::new().with_place("Paris", Coordinate::new(48.8566, 2.3522));

        geocoder.resolve("Paris").await;
        geocoder.resolve("Paris").await;

        assert_eq!(geocoder.lookup_count(), 2);
    }
}
