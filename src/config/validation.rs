//! Configuration validation functionality.
//!
//! Rejects settings that can never produce a day length: missing or
//! out-of-range coordinates, unknown timezones and silly search radii.

use anyhow::{Context, Result};

use super::Config;
use crate::constants::{MAXIMUM_CITY_RADIUS_KM, MINIMUM_CITY_RADIUS_KM};
use crate::geo;

/// Validate everything `sol` needs before any solar computation runs.
pub fn validate_config(config: &Config) -> Result<()> {
    let (lat, lon) = match (config.latitude, config.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        (None, None) => anyhow::bail!("latitude and longitude must be specified"),
        (None, Some(_)) => anyhow::bail!("latitude must be specified alongside longitude"),
        (Some(_), None) => anyhow::bail!("longitude must be specified alongside latitude"),
    };

    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if let Some(name) = config.timezone.as_deref() {
        geo::parse_timezone(name).context("Invalid timezone setting")?;
    }

    if let Some(radius) = config.city_radius_km
        && !(MINIMUM_CITY_RADIUS_KM..=MAXIMUM_CITY_RADIUS_KM).contains(&radius)
    {
        anyhow::bail!(
            "city_radius_km ({}) must be between {} and {} km",
            radius,
            MINIMUM_CITY_RADIUS_KM,
            MAXIMUM_CITY_RADIUS_KM
        );
    }

    if let Some(city) = config.city.as_deref()
        && city.trim().is_empty()
    {
        anyhow::bail!("city cannot be empty; remove the setting to use the nearest city");
    }

    if let Some(messages) = config.messages.as_deref()
        && messages.trim().is_empty()
    {
        anyhow::bail!("messages cannot be empty; remove the setting to use built-in messages");
    }

    Ok(())
}
