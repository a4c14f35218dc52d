//! Sunrise/sunset provider abstraction and the `sunrise`-crate implementation.
//!
//! The day-length core never computes solar positions itself. It asks a
//! [`SunriseSunsetProvider`] for the sunrise and sunset instants of a date,
//! which keeps the arithmetic testable with hand-made times and lets the
//! binary plug in [`SolarProvider`].
//!
//! ## Polar regions
//!
//! Above the polar circles there are dates with no sunrise (polar night) or
//! no sunset (midnight sun). The provider reports these as a
//! [`ProviderError`] instead of inventing times; the caller decides what to
//! show.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::error::ProviderError;

/// Sunrise and sunset for one calendar day, expressed in the requested zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
}

impl SunTimes {
    /// Build a pair, rejecting a sunset that comes before its sunrise.
    pub fn new(
        date: NaiveDate,
        sunrise: DateTime<Tz>,
        sunset: DateTime<Tz>,
    ) -> Result<Self, ProviderError> {
        if sunset < sunrise {
            return Err(ProviderError::new(
                date,
                format!("sunset {sunset} precedes sunrise {sunrise}"),
            ));
        }
        Ok(Self { sunrise, sunset })
    }

    /// Sunset minus sunrise. Never negative for a pair built with [`SunTimes::new`].
    pub fn day_length(&self) -> TimeDelta {
        self.sunset.signed_duration_since(self.sunrise)
    }
}

/// Source of sunrise/sunset instants for a date and coordinates.
///
/// Implementations must be pure: the same arguments give the same answer.
/// Any `Fn(NaiveDate, f64, f64, Tz) -> Result<SunTimes, ProviderError>`
/// closure is a provider too.
#[cfg_attr(test, mockall::automock)]
pub trait SunriseSunsetProvider {
    fn sun_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        tz: Tz,
    ) -> Result<SunTimes, ProviderError>;
}

impl<F> SunriseSunsetProvider for F
where
    F: Fn(NaiveDate, f64, f64, Tz) -> Result<SunTimes, ProviderError>,
{
    fn sun_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        tz: Tz,
    ) -> Result<SunTimes, ProviderError> {
        self(date, latitude, longitude, tz)
    }
}

/// Which side of the horizon the sun stays on for a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarCondition {
    /// The sun never sets.
    MidnightSun,
    /// The sun never rises.
    PolarNight,
}

impl PolarCondition {
    fn describe(self) -> &'static str {
        match self {
            PolarCondition::MidnightSun => "midnight sun, the sun does not set",
            PolarCondition::PolarNight => "polar night, the sun does not rise",
        }
    }
}

/// Sun elevation at sunrise/sunset: refraction plus the solar radius.
const HORIZON_ELEVATION_DEG: f64 = -0.833;

/// Events further than this from the requested date mean the calculation
/// produced no real crossing of the horizon.
const MAX_EVENT_DRIFT_HOURS: i64 = 36;

/// Rough polar day/night test from the solar declination.
///
/// Uses the cosine of the sunrise hour angle; outside [-1, 1] the sun does
/// not cross the horizon that day. [`SolarProvider`] only consults this to
/// name the reason once the `sunrise` crate has failed to produce events.
pub fn polar_condition(latitude: f64, date: NaiveDate) -> Option<PolarCondition> {
    let day_of_year = date.ordinal() as f64;
    let declination =
        (-23.44_f64).to_radians() * ((360.0 / 365.0) * (day_of_year + 10.0)).to_radians().cos();
    let phi = latitude.to_radians();

    let cos_hour_angle = (HORIZON_ELEVATION_DEG.to_radians().sin()
        - phi.sin() * declination.sin())
        / (phi.cos() * declination.cos());

    if !cos_hour_angle.is_finite() {
        // Exactly at a pole; decide from which hemisphere is facing the sun.
        return Some(if latitude * declination > 0.0 {
            PolarCondition::MidnightSun
        } else {
            PolarCondition::PolarNight
        });
    }

    if cos_hour_angle < -1.0 {
        Some(PolarCondition::MidnightSun)
    } else if cos_hour_angle > 1.0 {
        Some(PolarCondition::PolarNight)
    } else {
        None
    }
}

/// Sunrise/sunset provider backed by the `sunrise` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarProvider;

impl SolarProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SolarProvider {
    /// Raw UTC events for the solar day the `sunrise` crate keys on `solar_date`.
    ///
    /// `None` when the events drift away from the date, which is what the
    /// crate produces when the sun does not cross the horizon.
    fn events(
        coord: Coordinates,
        solar_date: NaiveDate,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let solar_day = SolarDay::new(coord, solar_date);
        let sunrise_utc = solar_day.event_time(SolarEvent::Sunrise);
        let sunset_utc = solar_day.event_time(SolarEvent::Sunset);

        let anchor = solar_date.and_hms_opt(12, 0, 0)?.and_utc();
        let max_drift = Duration::hours(MAX_EVENT_DRIFT_HOURS);
        let drifted = [sunrise_utc, sunset_utc].iter().any(|event| {
            let drift = event.signed_duration_since(anchor);
            drift > max_drift || drift < -max_drift
        });
        (!drifted).then_some((sunrise_utc, sunset_utc))
    }
}

impl SunriseSunsetProvider for SolarProvider {
    fn sun_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        tz: Tz,
    ) -> Result<SunTimes, ProviderError> {
        let coord = Coordinates::new(latitude, longitude).ok_or_else(|| {
            ProviderError::new(
                date,
                format!("coordinates ({latitude}, {longitude}) rejected by solar calculator"),
            )
        })?;

        // The crate's solar day follows longitude, not the civil zone, so in
        // zones far from their meridian (Pacific/Apia) it can land on the
        // neighbouring local date. Try the adjacent solar days until the
        // sunrise falls on `date` in `tz`.
        for offset in [0, -1, 1] {
            let Some(solar_date) = date.checked_add_signed(Duration::days(offset)) else {
                continue;
            };
            let Some((sunrise_utc, sunset_utc)) = Self::events(coord, solar_date) else {
                let reason = polar_condition(latitude, date)
                    .map(|condition| condition.describe().to_string())
                    .unwrap_or_else(|| {
                        format!("no sunrise or sunset on this date at latitude {latitude:.2}")
                    });
                return Err(ProviderError::new(date, reason));
            };

            let sunrise = sunrise_utc.with_timezone(&tz);
            if sunrise.date_naive() == date {
                return SunTimes::new(date, sunrise, sunset_utc.with_timezone(&tz));
            }
        }

        Err(ProviderError::new(
            date,
            format!("no sunrise falls on this local date in {tz}"),
        ))
    }
}
