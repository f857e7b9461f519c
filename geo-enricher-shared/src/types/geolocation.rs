//! Coordinate and geolocation types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::geohash;

/// Field under which the geolocation record is attached to enriched documents.
pub const GEOLOCATION_FIELD: &str = "geolocation";

/// A resolved latitude/longitude pair in decimal degrees.
///
/// Both values always travel together; an unresolved location is expressed as
/// `Option<Coordinate>::None`, never as a coordinate with one half missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse a pair of decimal strings as returned by geocoding providers.
    ///
    /// Returns `None` if either value is missing, unparseable, non-finite, or
    /// outside the valid latitude (-90..=90) or longitude (-180..=180) range.
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }
}

/// A resolved coordinate together with the decimal text it was read from.
///
/// The text is what ends up in the geolocation record, so a provider answer of
/// `"51.50000"` is written back as `"51.50000"` rather than re-formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPoint {
    pub coord: Coordinate,
    pub lat: String,
    pub lon: String,
}

impl GeocodedPoint {
    /// Parse provider decimal strings, keeping their trimmed text.
    ///
    /// Fails under the same conditions as [`Coordinate::parse`].
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let coord = Coordinate::parse(lat, lon)?;
        Some(Self {
            coord,
            lat: lat.trim().to_string(),
            lon: lon.trim().to_string(),
        })
    }
}

impl From<Coordinate> for GeocodedPoint {
    fn from(coord: Coordinate) -> Self {
        Self {
            coord,
            lat: coord.lat.to_string(),
            lon: coord.lon.to_string(),
        }
    }
}

/// The geolocation record attached to a document.
///
/// `Resolved` serializes as `{"geohash": ..., "lat": ..., "lon": ...}` with the
/// degrees kept as the decimal strings the provider returned; `Empty`
/// serializes as `{}` and marks a document that was considered but not
/// eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geolocation {
    Resolved {
        geohash: String,
        lat: String,
        lon: String,
    },
    Empty {},
}

impl Geolocation {
    /// Build the record for a resolved point at the given geohash precision.
    pub fn from_point(point: &GeocodedPoint, precision: usize) -> Self {
        Self::Resolved {
            geohash: geohash::encode(point.coord, precision),
            lat: point.lat.clone(),
            lon: point.lon.clone(),
        }
    }

    /// The empty marker record.
    pub fn empty() -> Self {
        Self::Empty {}
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty {})
    }

    /// Convert into the JSON value stored in the document body.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Resolved { geohash, lat, lon } => json!({
                "geohash": geohash,
                "lat": lat,
                "lon": lon,
            }),
            Self::Empty {} => Value::Object(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let coord = Coordinate::parse("48.85341", " 2.3488 ").unwrap();
        assert_eq!(coord, Coordinate::new(48.85341, 2.3488));
    }

    #[test]
    fn test_parse_coordinate_rejects_invalid() {
        assert!(Coordinate::parse("", "2.3").is_none());
        assert!(Coordinate::parse("north", "2.3").is_none());
        assert!(Coordinate::parse("91.0", "2.3").is_none());
        assert!(Coordinate::parse("45.0", "-180.5").is_none());
        assert!(Coordinate::parse("NaN", "2.3").is_none());
    }

    #[test]
    fn test_point_keeps_provider_text() {
        let point = GeocodedPoint::parse(" 51.50000", "-0.12570 ").unwrap();
        assert_eq!(point.coord, Coordinate::new(51.5, -0.1257));

        let value = Geolocation::from_point(&point, 8).to_value();
        assert_eq!(value["lat"], "51.50000");
        assert_eq!(value["lon"], "-0.12570");
        assert_eq!(value["geohash"], geohash::encode(point.coord, 8));

        assert!(GeocodedPoint::parse("north", "2.3").is_none());
    }

    #[test]
    fn test_resolved_to_value() {
        let point = GeocodedPoint::from(Coordinate::new(48.8566, 2.3522));
        let geo = Geolocation::from_point(&point, 8);

        let value = geo.to_value();
        assert_eq!(value["lat"], "48.8566");
        assert_eq!(value["lon"], "2.3522");
        assert_eq!(value["geohash"].as_str().unwrap().len(), 8);
        assert!(!geo.is_empty());
    }

    #[test]
    fn test_empty_to_value() {
        let geo = Geolocation::empty();
        assert!(geo.is_empty());
        assert_eq!(geo.to_value(), json!({}));
        assert_eq!(serde_json::to_value(&geo).unwrap(), json!({}));
    }
}
