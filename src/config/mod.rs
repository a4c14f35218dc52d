//! Configuration for the `sol` command.
//!
//! The configuration lives in `sol.toml`, found in `$XDG_CONFIG_HOME/sol/`
//! or in a directory passed with `--config`:
//!
//! ```toml
//! #[Location]
//! latitude = 51.507400        # Geographic latitude (-90 to 90)
//! longitude = -0.127800       # Geographic longitude (-180 to 180)
//! timezone = "Europe/London"  # IANA timezone (detected from coordinates when omitted)
//!
//! #[Message]
//! city = "London"             # Name used in the message (nearest known city when omitted)
//! city_radius_km = 100        # How far to look for the nearest city (1-1000)
//! messages = "messages.toml"  # Message catalogue (built-in English when omitted)
//! ```
//!
//! Only the coordinates are required. Relative `messages` paths are
//! resolved against the directory holding `sol.toml`.

pub mod builder;
pub mod loading;
pub mod validation;


use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::geo::{self, CityResolver, FixedCity, Location, NearestCity};
use crate::message::MessageCatalog;

pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, set_config_dir};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub city: Option<String>,
    pub city_radius_km: Option<f64>,
    pub messages: Option<String>,
}

impl Config {
    /// Load from the default location (or the `--config` directory).
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// The configured coordinates as a validated [`Location`].
    pub fn location(&self) -> Result<Location> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Location::new(lat, lon)
                .with_context(|| format!("Invalid coordinates in configuration: {lat}, {lon}")),
            _ => anyhow::bail!("Configuration needs both latitude and longitude"),
        }
    }

    /// Configured timezone, or the one detected at `location`.
    pub fn resolve_timezone(&self, location: &Location) -> Result<Tz> {
        match self.timezone.as_deref() {
            Some(name) => geo::parse_timezone(name),
            None => Ok(geo::detect_timezone(location)),
        }
    }

    /// City name source: the fixed `city` if set, else a nearest-city search.
    pub fn city_resolver(&self) -> Box<dyn CityResolver> {
        match &self.city {
            Some(name) => Box::new(FixedCity(name.clone())),
            None => Box::new(NearestCity::new(
                self.city_radius_km
                    .unwrap_or(geo::city::DEFAULT_CITY_RADIUS_KM),
            )),
        }
    }

    /// Message catalogue, resolving a relative path against `base_dir`.
    pub fn message_catalog(&self, base_dir: Option<&Path>) -> Result<MessageCatalog> {
        match &self.messages {
            Some(path) => {
                let path = PathBuf::from(path);
                let path = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path,
                };
                MessageCatalog::load(&path)
            }
            None => Ok(MessageCatalog::english()),
        }
    }

    /// Print the effective settings (debug output).
    pub fn log_config(&self, location: &Location, tz: Tz) {
        log_block_start!("Configuration");
        log_indented!("Location: {location}");
        match &self.timezone {
            Some(_) => log_indented!("Timezone: {tz}"),
            None => log_indented!("Timezone: {tz} (detected)"),
        }
        match &self.city {
            Some(city) => log_indented!("City: {city}"),
            None => log_indented!(
                "City: nearest within {} km",
                self.city_radius_km
                    .unwrap_or(geo::city::DEFAULT_CITY_RADIUS_KM)
            ),
        }
        match &self.messages {
            Some(path) => log_indented!("Messages: {path}"),
            None => log_indented!("Messages: built-in (English)"),
        }
    }
}
