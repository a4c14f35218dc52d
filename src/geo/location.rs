//! Validated geographic coordinates.

use serde::Serialize;

use crate::error::{DayLengthError, Result};

/// A point on Earth in signed decimal degrees.
///
/// Construction checks the ranges once so everything downstream can trust
/// the values. Fields are private; a `Location` is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Create a location, rejecting anything outside -90..=90 / -180..=180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !is_valid(latitude, longitude) {
            return Err(DayLengthError::invalid_location(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in kilometres (haversine).
    pub fn distance_km(&self, other: &Location) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// True for finite coordinates inside -90..=90 / -180..=180.
pub fn is_valid(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

const EARTH_RADIUS_KM: f64 = 6371.0;

pub(crate) fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{ns}, {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_and_non_finite() {
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());
        for (lat, lon) in [(90.1, 0.0), (0.0, -180.1), (f64::NAN, 0.0), (0.0, f64::INFINITY)] {
            assert!(
                matches!(
                    Location::new(lat, lon),
                    Err(DayLengthError::InvalidLocation { .. })
                ),
                "{lat}, {lon}"
            );
        }
    }

    #[test]
    fn test_distance_london_paris() {
        let london = Location::new(51.5074, -0.1278).unwrap();
        let paris = Location::new(48.8566, 2.3522).unwrap();
        let d = london.distance_km(&paris);
        assert!((330.0..360.0).contains(&d), "{d}");
        assert_eq!(london.distance_km(&london), 0.0);
    }

    #[test]
    fn test_display_hemispheres() {
        let sydney = Location::new(-33.8688, 151.2093).unwrap();
        assert_eq!(sydney.to_string(), "33.8688°S, 151.2093°E");
    }
}
