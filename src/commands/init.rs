//! `sol init <latitude> <longitude>`: write the configuration file.
//!
//! Creates a commented `sol.toml` when none exists. An existing file only
//! gets its coordinates replaced; every other setting is left alone.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::builder::{create_default_config, update_coordinates};
use crate::config::get_config_path;
use crate::geo::Location;

/// Handle `sol init` against the active config path.
pub fn handle_init_command(latitude: f64, longitude: f64) -> Result<()> {
    let path = get_config_path()?;
    init_config_at(&path, latitude, longitude)?;
    log_end!();
    Ok(())
}

/// Create or update the config file at `path`.
pub fn init_config_at(path: &Path, latitude: f64, longitude: f64) -> Result<()> {
    let location = Location::new(latitude, longitude)
        .with_context(|| format!("Cannot initialize with coordinates {latitude}, {longitude}"))?;

    if path.exists() {
        update_coordinates(path, &location)
    } else {
        create_default_config(path, &location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_from_path;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_then_updates() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("sol").join("sol.toml");

        init_config_at(&path, 48.8566, 2.3522).unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.latitude, Some(48.8566));
        assert_eq!(config.timezone.as_deref(), Some("Europe/Paris"));

        init_config_at(&path, 45.764, 4.8357).unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.latitude, Some(45.764));
        assert_eq!(config.longitude, Some(4.8357));
        // Timezone line from the first run is kept
        assert_eq!(config.timezone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn test_init_rejects_out_of_range_coordinates() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("sol.toml");

        assert!(init_config_at(&path, 95.0, 0.0).is_err());
        assert!(!path.exists());
    }
}
