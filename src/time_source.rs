//! Time source abstraction: the real clock or a pinned instant.
//!
//! The day-length core takes "now" as a parameter. The CLI gets that value
//! from here, so `--at "2024-03-20 18:00:00"` can replay any moment without
//! touching the system clock.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting "what time is it"
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// True when `now` is fixed rather than read from the clock.
    fn is_pinned(&self) -> bool {
        false
    }
}

/// The system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always answers the same instant.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn is_pinned(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Utc> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Check if the global time source is pinned
pub fn is_pinned() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_pinned()
}

/// Parse "YYYY-MM-DD HH:MM:SS" as a wall-clock time in `tz`.
///
/// Times that do not exist or are ambiguous in `tz` (DST gaps and overlaps)
/// are rejected rather than guessed.
pub fn parse_datetime_in_tz(s: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), crate::constants::DATETIME_FORMAT)
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or invalid time in timezone {tz}"))
}
