//! Day-length change between today and yesterday.
//!
//! This is the arithmetic behind the daily message. Given a location, a
//! timezone and a sunrise/sunset provider it answers four questions:
//!
//! - how much longer (or shorter) is today than yesterday ([`compute_delta`])
//! - is the day growing ([`DayLengthDelta::is_lengthening`])
//! - how many minutes is that, rounded for humans ([`DayLengthDelta::minutes_magnitude`])
//! - has today's sunset already happened ([`tense_of`])
//!
//! Everything here is a pure function of its inputs. "Now" is always a
//! parameter; nothing reads the clock, and provider errors are handed back
//! untouched.
//!
//! ## Rounding
//!
//! The minute count uses `minutes + seconds / 30` on the absolute value, so
//! 29 seconds round down and 30 seconds round up:
//!
//! | delta   | minutes |
//! |---------|---------|
//! | +122 s  | 2       |
//! | +90 s   | 2       |
//! | +89 s   | 1       |
//! | -45 s   | 1       |
//! | 0 s     | 0       |

pub mod phases;


use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::{DayLengthError, ProviderError, Result};
use crate::geo::{Location, SunTimes, SunriseSunsetProvider};

pub use phases::ThreeDayPhases;

const SECONDS_PER_MINUTE: u64 = 60;
const ROUND_UP_SECONDS: u64 = 30;

/// Grammatical tense for the message: has today's sunset happened yet?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Past,
    Present,
}

/// Signed change in day length: today's length minus yesterday's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayLengthDelta(TimeDelta);

impl DayLengthDelta {
    pub fn new(delta: TimeDelta) -> Self {
        Self(delta)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self(TimeDelta::seconds(seconds))
    }

    /// Delta between two days' sun times.
    pub fn between(today: &SunTimes, yesterday: &SunTimes) -> Self {
        Self(today.day_length() - yesterday.day_length())
    }

    pub fn duration(&self) -> TimeDelta {
        self.0
    }

    /// Whole seconds, truncated toward zero.
    pub fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }

    /// True only for a strictly positive delta.
    ///
    /// The message has a "more" and a "less" phrasing and nothing in
    /// between, so an unchanged day length reads as "less".
    pub fn is_lengthening(&self) -> bool {
        self.0 > TimeDelta::zero()
    }

    /// Absolute delta in minutes, rounding half a minute and up to the next.
    ///
    /// Sub-second precision is dropped before rounding. Hours, if any, are
    /// counted as minutes.
    pub fn minutes_magnitude(&self) -> u32 {
        let total_seconds = self.0.num_seconds().unsigned_abs();
        let minutes = total_seconds / SECONDS_PER_MINUTE;
        let seconds = total_seconds % SECONDS_PER_MINUTE;
        u32::try_from(minutes + seconds / ROUND_UP_SECONDS).unwrap_or(u32::MAX)
    }
}

impl std::ops::Neg for DayLengthDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::fmt::Display for DayLengthDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.0.num_seconds();
        let sign = if secs < 0 { '-' } else { '+' };
        let abs = secs.unsigned_abs();
        write!(f, "{sign}{}m {:02}s", abs / 60, abs % 60)
    }
}

// Serialized as signed whole seconds
impl Serialize for DayLengthDelta {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.num_seconds())
    }
}

/// `Past` if `now` is strictly after today's sunset, otherwise `Present`.
pub fn tense_of<A: TimeZone, B: TimeZone>(now: &DateTime<A>, todays_sunset: &DateTime<B>) -> Tense {
    if now.naive_utc() > todays_sunset.naive_utc() {
        Tense::Past
    } else {
        Tense::Present
    }
}

/// Calendar date of `now` in `tz`, and the day before it.
pub fn today_and_yesterday(now: &DateTime<Utc>, tz: Tz) -> Result<(NaiveDate, NaiveDate)> {
    let today = now.with_timezone(&tz).date_naive();
    let yesterday = today
        .pred_opt()
        .ok_or_else(|| ProviderError::new(today, "no calendar day before this date"))?;
    Ok((today, yesterday))
}

/// Change in day length between today and yesterday at raw coordinates.
///
/// Coordinates are range-checked before the provider is called; a bad pair
/// is [`DayLengthError::InvalidLocation`]. Provider failures for either day
/// come back as [`DayLengthError::Provider`] with the failing date.
pub fn compute_delta<P: SunriseSunsetProvider>(
    latitude: f64,
    longitude: f64,
    tz: Tz,
    now: DateTime<Utc>,
    provider: P,
) -> Result<DayLengthDelta> {
    DayLengthAnalyzer::new(latitude, longitude, tz, provider)?.compute_delta(now)
}

/// Everything the message needs from one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DayLengthSummary {
    pub date: NaiveDate,
    pub today: SunTimes,
    pub yesterday: SunTimes,
    pub delta: DayLengthDelta,
    pub lengthening: bool,
    pub minutes: u32,
    pub tense: Tense,
}

impl DayLengthSummary {
    pub(crate) fn from_days(
        date: NaiveDate,
        today: SunTimes,
        yesterday: SunTimes,
        now: &DateTime<Utc>,
    ) -> Self {
        let delta = DayLengthDelta::between(&today, &yesterday);
        let tense = tense_of(now, &today.sunset);
        Self {
            date,
            today,
            yesterday,
            delta,
            lengthening: delta.is_lengthening(),
            minutes: delta.minutes_magnitude(),
            tense,
        }
    }
}

/// A location and timezone bound to a provider.
///
/// Holds no computed state; each call asks the provider again.
#[derive(Debug, Clone)]
pub struct DayLengthAnalyzer<P> {
    location: Location,
    tz: Tz,
    provider: P,
}

impl<P: SunriseSunsetProvider> DayLengthAnalyzer<P> {
    /// Validate raw coordinates and bind them.
    pub fn new(latitude: f64, longitude: f64, tz: Tz, provider: P) -> Result<Self> {
        let location = Location::new(latitude, longitude)?;
        Ok(Self::from_location(location, tz, provider))
    }

    pub fn from_location(location: Location, tz: Tz, provider: P) -> Self {
        Self {
            location,
            tz,
            provider,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Sun times for one calendar date in the bound timezone.
    pub fn sun_times(&self, date: NaiveDate) -> Result<SunTimes> {
        self.provider
            .sun_times(
                date,
                self.location.latitude(),
                self.location.longitude(),
                self.tz,
            )
            .map_err(DayLengthError::from)
    }

    /// Today's day length minus yesterday's, "today" taken in the bound zone.
    pub fn compute_delta(&self, now: DateTime<Utc>) -> Result<DayLengthDelta> {
        Ok(self.summarize(now)?.delta)
    }

    /// Delta plus the derived flags, in one pass over the provider.
    pub fn summarize(&self, now: DateTime<Utc>) -> Result<DayLengthSummary> {
        let (today, yesterday) = today_and_yesterday(&now, self.tz)?;
        let today_times = self.sun_times(today)?;
        let yesterday_times = self.sun_times(yesterday)?;
        Ok(DayLengthSummary::from_days(
            today,
            today_times,
            yesterday_times,
            &now,
        ))
    }
}
