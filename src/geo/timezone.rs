//! Timezone detection from coordinates.

use chrono_tz::Tz;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

use super::Location;

/// Determine the IANA timezone for a location using timezone boundary data.
///
/// Falls back to UTC when the finder answers with a name chrono-tz does not
/// know (open ocean yields `Etc/GMT±N` names, most of which parse, but not all).
pub fn detect_timezone(location: &Location) -> Tz {
    static FINDER: OnceLock<DefaultFinder> = OnceLock::new();
    let finder = FINDER.get_or_init(DefaultFinder::new);

    // tzf-rs takes (longitude, latitude)
    let tz_name = finder.get_tz_name(location.longitude(), location.latitude());

    tz_name.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Parse a timezone name, producing a readable error for config validation.
pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("unknown timezone '{name}' (expected an IANA name such as \"Europe/London\")"))
}
