//! Application-wide constants.

// # Configuration

/// Directory under the user's config dir holding our files.
pub const CONFIG_DIR_NAME: &str = "sol";

/// Main configuration file name.
pub const CONFIG_FILE_NAME: &str = "sol.toml";

/// Nearest-city search radius bounds (km).
pub const MINIMUM_CITY_RADIUS_KM: f64 = 1.0;
pub const MAXIMUM_CITY_RADIUS_KM: f64 = 1000.0;

// # Process

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

// # Display

/// Time format used in reports.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Date-time format accepted by `--at` and shown in reports.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
