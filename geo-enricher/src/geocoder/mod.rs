//! Place name resolution.
//!
//! This module provides:
//! - [`GeocodeResolver`] trait for abstracting the geocoding provider
//! - [`GeonamesClient`] production client that queries the GeoNames search API
//! - [`MockGeocoder`] mock resolver with pre-configured name → coordinate mappings

mod geonames;
mod mock;

pub use geonames::GeonamesClient;
pub use mock::MockGeocoder;

use async_trait::async_trait;
use geo_enricher_shared::GeocodedPoint;

/// Trait for resolving a place name to a geocoded point.
///
/// Resolution is best effort: a name the provider does not know, an
/// unparseable answer and a transport fault all come back as `None`. Nothing
/// is cached, so resolving the same name twice queries the provider twice.
///
/// # Example
///
/// ```ignore
/// use geo_enricher::geocoder::GeocodeResolver;
///
/// async fn locate<R: GeocodeResolver>(resolver: &R) {
///     if let Some(point) = resolver.resolve("Paris").await {
///         println!("{} {}", point.lat, point.lon);
///     }
/// }
/// ```
#[async_trait]
pub trait GeocodeResolver: Send + Sync {
    /// Resolve a non-empty display name to the best candidate's point.
    async fn resolve(&self, name: &str) -> Option<GeocodedPoint>;
}
