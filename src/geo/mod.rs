//! Geographic inputs for day-length calculations.
//!
//! ## Module Structure
//!
//! - [`location`]: Validated latitude/longitude pairs
//! - [`solar`]: The sunrise/sunset provider trait and its `sunrise`-crate implementation
//! - [`timezone`]: Timezone detection from coordinates
//! - [`city`]: Nearest-city lookup for the message text

pub mod city;
pub mod location;
pub mod solar;
pub mod timezone;

pub use city::{CityResolver, FixedCity, NearestCity};
pub use location::Location;
pub use solar::{SolarProvider, SunTimes, SunriseSunsetProvider};
pub use timezone::{detect_timezone, parse_timezone};
