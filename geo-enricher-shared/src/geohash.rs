//! Geohash encoding.
//!
//! Encodes a coordinate into the standard base-32 geohash: longitude and
//! latitude ranges are bisected alternately (longitude first), each bisection
//! contributing one bit, and every five bits select one character.

use crate::types::geolocation::Coordinate;

/// Precision used for every document written by the enricher.
pub const DEFAULT_PRECISION: usize = 8;

/// Longest geohash produced. Twelve characters resolve to a few centimeters.
pub const MAX_PRECISION: usize = 12;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Encode a coordinate as a geohash of `precision` characters.
///
/// Precision is capped at [`MAX_PRECISION`]; a precision of zero yields an
/// empty string.
///
/// # Example
///
/// ```
/// use geo_enricher_shared::{geohash, Coordinate};
///
/// let hash = geohash::encode(Coordinate::new(57.64911, 10.40744), 11);
/// assert_eq!(hash, "u4pruydqqvj");
/// ```
pub fn encode(coord: Coordinate, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let mut hash = String::with_capacity(precision);

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut even_bit = true;
    let mut bits = 0usize;
    let mut index = 0usize;

    while hash.len() < precision {
        let (range, value) = if even_bit {
            (&mut lon_range, coord.lon)
        } else {
            (&mut lat_range, coord.lat)
        };

        let mid = (range.0 + range.1) / 2.0;
        index <<= 1;
        if value >= mid {
            index |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }

        even_bit = !even_bit;
        bits += 1;
        if bits == 5 {
            hash.push(BASE32[index] as char);
            bits = 0;
            index = 0;
        }
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(Coordinate::new(57.64911, 10.40744), 11), "u4pruydqqvj");
        assert_eq!(encode(Coordinate::new(48.8566, 2.3522), 8), "u09tvw0f");
        assert_eq!(encode(Coordinate::new(40.7128, -74.0060), 8), "dr5regw3");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(encode(Coordinate::new(0.0, 0.0), 8), "s0000000");
        assert_eq!(encode(Coordinate::new(-90.0, -180.0), 8), "00000000");
        assert_eq!(encode(Coordinate::new(90.0, 180.0), 8), "zzzzzzzz");
    }

    #[test]
    fn test_deterministic() {
        let coord = Coordinate::new(35.6762, 139.6503);
        assert_eq!(
            encode(coord, DEFAULT_PRECISION),
            encode(coord, DEFAULT_PRECISION)
        );
    }

    #[test]
    fn test_precision_is_prefix() {
        let coord = Coordinate::new(-33.8688, 151.2093);
        let long = encode(coord, 10);
        let short = encode(coord, 5);
        assert_eq!(long.len(), 10);
        assert!(long.starts_with(&short));
    }

    #[test]
    fn test_precision_bounds() {
        let coord = Coordinate::new(10.0, 10.0);
        assert_eq!(encode(coord, 0), "");
        assert_eq!(encode(coord, 40).len(), MAX_PRECISION);
    }
}
