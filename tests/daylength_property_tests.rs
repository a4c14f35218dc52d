use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use sol::daylength::{DayLengthDelta, Tense, compute_delta, tense_of};
use sol::error::ProviderError;
use sol::geo::{SolarProvider, SunTimes, SunriseSunsetProvider};

/// Deltas up to two hours either way
fn delta_seconds_strategy() -> impl Strategy<Value = i64> {
    -7200i64..=7200
}

/// Any date this century
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=365).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal).unwrap()
    })
}

/// Property tests for the delta helpers
#[cfg(test)]
mod delta_properties {
    use super::*;

    proptest! {
        /// Rounding only looks at the size of the change
        #[test]
        fn test_magnitude_is_sign_symmetric(secs in delta_seconds_strategy()) {
            let delta = DayLengthDelta::from_seconds(secs);
            prop_assert_eq!(delta.minutes_magnitude(), (-delta).minutes_magnitude());
        }

        /// Whole minutes plus one when 30 or more seconds are left over
        #[test]
        fn test_magnitude_formula(secs in delta_seconds_strategy()) {
            let abs = secs.unsigned_abs();
            let expected = (abs / 60 + (abs % 60) / 30) as u32;
            prop_assert_eq!(DayLengthDelta::from_seconds(secs).minutes_magnitude(), expected);
        }

        /// Magnitude never drifts more than half a minute from the exact value
        #[test]
        fn test_magnitude_is_nearest_minute(secs in delta_seconds_strategy()) {
            let magnitude = DayLengthDelta::from_seconds(secs).minutes_magnitude() as i64;
            let error = (magnitude * 60 - secs.abs()).abs();
            prop_assert!(error <= 30, "{secs}s rounded to {magnitude} minutes");
        }

        #[test]
        fn test_lengthening_iff_positive(secs in delta_seconds_strategy()) {
            prop_assert_eq!(DayLengthDelta::from_seconds(secs).is_lengthening(), secs > 0);
        }

        /// Swapping the two day lengths negates the delta
        #[test]
        fn test_compute_delta_antisymmetry(
            today_len in 0i64..86_400,
            yesterday_len in 0i64..86_400,
            date in date_strategy(),
        ) {
            let tz: Tz = chrono_tz::UTC;
            let now = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());

            let provider = |lens: (i64, i64)| {
                move |day: NaiveDate, _lat: f64, _lon: f64, tz: Tz|
                    -> Result<SunTimes, ProviderError> {
                    let len = if day == date { lens.0 } else { lens.1 };
                    let sunrise = tz.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
                    SunTimes::new(day, sunrise, sunrise + TimeDelta::seconds(len))
                }
            };

            let forward = compute_delta(10.0, 10.0, tz, now, provider((today_len, yesterday_len))).unwrap();
            let backward = compute_delta(10.0, 10.0, tz, now, provider((yesterday_len, today_len))).unwrap();

            prop_assert_eq!(forward.num_seconds(), today_len - yesterday_len);
            prop_assert_eq!(forward, -backward);
        }

        #[test]
        fn test_tense_follows_sunset(offset in -86_400i64..86_400) {
            let sunset = Utc.with_ymd_and_hms(2024, 6, 21, 20, 0, 0).unwrap();
            let now = sunset + TimeDelta::seconds(offset);
            let expected = if offset > 0 { Tense::Past } else { Tense::Present };
            prop_assert_eq!(tense_of(&now, &sunset), expected);
        }
    }
}

/// Property tests against the real solar calculation
#[cfg(test)]
mod solar_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Away from the poles the sun always rises and sets, and a day is never negative
        #[test]
        fn test_day_length_non_negative(
            lat in -60.0f64..60.0,
            lon in -30.0f64..30.0,
            date in date_strategy(),
        ) {
            let times = SolarProvider::new()
                .sun_times(date, lat, lon, chrono_tz::UTC)
                .unwrap();
            let length = times.day_length();
            prop_assert!(length >= TimeDelta::zero());
            prop_assert!(length <= TimeDelta::hours(24));
        }

        /// Day length changes slowly: well under a quarter hour per day below 60 degrees
        #[test]
        fn test_daily_change_is_small(
            lat in -60.0f64..60.0,
            lon in -30.0f64..30.0,
            date in date_strategy(),
        ) {
            let now = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
            let delta = compute_delta(lat, lon, chrono_tz::UTC, now, SolarProvider::new()).unwrap();
            prop_assert!(delta.num_seconds().abs() < 15 * 60, "{delta} at {lat}");
        }
    }
}
