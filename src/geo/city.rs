//! Nearest-city resolution for message text.
//!
//! Message templates mention `{city}`, so we need a human name for the
//! coordinates. [`NearestCity`] does a linear scan over the `cities` crate's
//! table; anything implementing [`CityResolver`] can replace it.

use super::Location;

/// Default search radius for [`NearestCity`], in kilometres.
pub const DEFAULT_CITY_RADIUS_KM: f64 = 100.0;

/// Resolves coordinates to a display name.
pub trait CityResolver {
    /// Name for the location, or `None` when nothing sensible is near.
    fn name_for(&self, location: &Location) -> Option<String>;
}

/// A city picked by [`NearestCity`].
#[derive(Debug, Clone, PartialEq)]
pub struct CityMatch {
    pub name: String,
    pub country: String,
    pub distance_km: f64,
}

/// Nearest city from the bundled world city table, within a radius.
#[derive(Debug, Clone)]
pub struct NearestCity {
    max_distance_km: f64,
}

impl Default for NearestCity {
    fn default() -> Self {
        Self::new(DEFAULT_CITY_RADIUS_KM)
    }
}

impl NearestCity {
    pub fn new(max_distance_km: f64) -> Self {
        Self { max_distance_km }
    }

    /// Closest city to `location` regardless of the radius.
    pub fn closest(&self, location: &Location) -> Option<CityMatch> {
        cities::all()
            .iter()
            .map(|city| {
                let distance_km = super::location::haversine_km(
                    location.latitude(),
                    location.longitude(),
                    city.latitude,
                    city.longitude,
                );
                (city, distance_km)
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(city, distance_km)| CityMatch {
                name: city.city.to_string(),
                country: city.country.to_string(),
                distance_km,
            })
    }

    /// Closest city within the configured radius.
    pub fn lookup(&self, location: &Location) -> Option<CityMatch> {
        self.closest(location)
            .filter(|m| m.distance_km <= self.max_distance_km)
    }
}

impl CityResolver for NearestCity {
    fn name_for(&self, location: &Location) -> Option<String> {
        self.lookup(location).map(|m| m.name)
    }
}

/// A fixed name, used when the configuration names the city explicitly.
#[derive(Debug, Clone)]
pub struct FixedCity(pub String);

impl CityResolver for FixedCity {
    fn name_for(&self, _location: &Location) -> Option<String> {
        Some(self.0.clone())
    }
}
