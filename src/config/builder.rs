//! Configuration file building.
//!
//! Writes a commented `sol.toml` for `sol init` and updates the coordinates
//! of an existing file in place, keeping its comments and alignment.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::loading::private_path;
use crate::constants::{MAXIMUM_CITY_RADIUS_KM, MINIMUM_CITY_RADIUS_KM};
use crate::geo::city::DEFAULT_CITY_RADIUS_KM;
use crate::geo::{self, Location, NearestCity};

/// Create a new config file for `location`.
///
/// The timezone is detected from the coordinates and written out explicitly
/// so it can be edited. When a known city lies within the default radius it
/// is mentioned in the `city` comment, but the setting itself is left
/// commented out so the nearest-city lookup stays in charge.
pub fn create_default_config(path: &Path, location: &Location) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let tz = geo::detect_timezone(location);
    let nearest = NearestCity::default().closest(location);

    let city_example = match &nearest {
        Some(city) => {
            log_indented!(
                "Nearest city: {} ({:.0} km away)",
                city.name,
                city.distance_km
            );
            format!("\"{}\"", city.name)
        }
        None => {
            log_indented!("No known city within {DEFAULT_CITY_RADIUS_KM} km");
            "\"Home\"".to_string()
        }
    };

    let config_content = ConfigBuilder::new()
        .add_section("Location")
        .add_setting(
            "latitude",
            &format!("{:.6}", location.latitude()),
            "Geographic latitude (-90 to 90)",
        )
        .add_setting(
            "longitude",
            &format!("{:.6}", location.longitude()),
            "Geographic longitude (-180 to 180)",
        )
        .add_setting(
            "timezone",
            &format!("\"{tz}\""),
            "IANA timezone (remove to detect from coordinates)",
        )
        .add_section("Message")
        .add_disabled_setting(
            "city",
            &city_example,
            "Name used in messages (nearest known city when unset)",
        )
        .add_setting(
            "city_radius_km",
            &format!("{DEFAULT_CITY_RADIUS_KM:.0}"),
            &format!(
                "Nearest city search radius ({MINIMUM_CITY_RADIUS_KM:.0}-{MAXIMUM_CITY_RADIUS_KM:.0} km)"
            ),
        )
        .add_disabled_setting(
            "messages",
            "\"messages.toml\"",
            "Message catalogue (built-in English when unset)",
        )
        .build();

    fs::write(path, config_content + "\n").context("Failed to write default config file")?;

    log_block_start!("Created configuration: {}", private_path(path));
    log_indented!("Latitude: {:.6}", location.latitude());
    log_indented!("Longitude: {:.6}", location.longitude());
    log_indented!("Timezone: {tz}");
    Ok(())
}

/// Replace the coordinates in an existing config file.
///
/// Comment columns of the two lines are kept aligned with each other.
/// Missing keys are appended at the end.
pub fn update_coordinates(path: &Path, location: &Location) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("No existing config file found at {}", private_path(path));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let lat_value = format!("{:.6}", location.latitude());
    let lon_value = format!("{:.6}", location.longitude());

    let lat_line = find_config_line(&content, "latitude");
    let lon_line = find_config_line(&content, "longitude");

    let target_column = match (&lat_line, &lon_line) {
        (Some((_, lat)), Some((_, lon))) => {
            let lat_pos = lat.find('#').unwrap_or(lat.len());
            let lon_pos = lon.find('#').unwrap_or(lon.len());
            lat_pos.max(lon_pos)
        }
        (Some((_, line)), None) | (None, Some((_, line))) => {
            line.find('#').unwrap_or(DEFAULT_COMMENT_COLUMN)
        }
        (None, None) => DEFAULT_COMMENT_COLUMN,
    };

    // Rewrite by line index so commented copies of a key stay untouched
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    if let Some((idx, line)) = &lat_line {
        lines[*idx] = align_comment_to_column(line, "latitude", &lat_value, target_column);
    }
    if let Some((idx, line)) = &lon_line {
        lines[*idx] = align_comment_to_column(line, "longitude", &lon_value, target_column);
    }
    if lat_line.is_none() {
        lines.push(format!("latitude = {lat_value}"));
    }
    if lon_line.is_none() {
        lines.push(format!("longitude = {lon_value}"));
    }

    let mut updated_content = lines.join("\n");
    if content.ends_with('\n') || lat_line.is_none() || lon_line.is_none() {
        updated_content.push('\n');
    }

    fs::write(path, updated_content).with_context(|| {
        format!("Failed to write updated config to {}", private_path(path))
    })?;

    log_block_start!("Updated config file: {}", private_path(path));
    log_indented!("Latitude: {lat_value}");
    log_indented!("Longitude: {lon_value}");

    Ok(())
}

/// Comment column used when no existing line gives one.
const DEFAULT_COMMENT_COLUMN: usize = 25;

/// Builder for creating dynamically-aligned configuration files.
///
/// All setting comments start in the same column, computed from the longest
/// setting line.
struct ConfigBuilder {
    entries: Vec<EntryType>,
}

enum EntryType {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(EntryType::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(EntryType::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// A setting written commented out, as an example of an optional key.
    fn add_disabled_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(EntryType::Setting {
            line: format!("#{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                EntryType::Setting { line, .. } => Some(line.chars().count()),
                EntryType::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                EntryType::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                EntryType::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.chars().count());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}

/// Find the first active (uncommented) config line for `key`, with its index.
pub(crate) fn find_config_line(content: &str, key: &str) -> Option<(usize, String)> {
    content
        .lines()
        .enumerate()
        .find(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with('#')
                && trimmed
                    .split_once('=')
                    .is_some_and(|(name, _)| name.trim() == key)
        })
        .map(|(idx, line)| (idx, line.to_string()))
}

/// Rewrite `key = value` keeping the trailing comment at `target_column`.
fn align_comment_to_column(
    original_line: &str,
    key: &str,
    new_value: &str,
    target_column: usize,
) -> String {
    let key_value_part = format!("{key} = {new_value}");

    match original_line.find('#') {
        Some(comment_pos) => {
            let comment_part = &original_line[comment_pos..];
            let padding_needed = target_column.saturating_sub(key_value_part.len()).max(1);
            format!(
                "{}{}{}",
                key_value_part,
                " ".repeat(padding_needed),
                comment_part
            )
        }
        None => key_value_part,
    }
}
