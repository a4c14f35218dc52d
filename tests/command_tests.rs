use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Europe::London;
use chrono_tz::Tz;
use sol::commands::Session;
use sol::commands::report::build_report;
use sol::commands::tomorrow::tomorrows_sunrise;
use sol::config::Config;
use sol::daylength::{DayLengthAnalyzer, Tense};
use sol::error::ProviderError;
use sol::geo::{Location, SunTimes, SunriseSunsetProvider};
use sol::logger::Log;
use sol::message::MessageCatalog;
use std::cell::Cell;
use std::fs;
use tempfile::tempdir;

/// Sunrise at 08:00 local, days two minutes longer than the day before.
fn lengthening(date: NaiveDate, _lat: f64, _lon: f64, tz: Tz) -> Result<SunTimes, ProviderError> {
    let sunrise = tz
        .from_local_datetime(&date.and_hms_opt(8, 0, 0).unwrap())
        .single()
        .unwrap();
    let sunset = sunrise + TimeDelta::hours(8) + TimeDelta::minutes(2 * date.ordinal() as i64);
    SunTimes::new(date, sunrise, sunset)
}

/// Same as `lengthening`, but the sun never rises after January 15th.
fn dark_from_16th(date: NaiveDate, lat: f64, lon: f64, tz: Tz) -> Result<SunTimes, ProviderError> {
    if date > NaiveDate::from_ymd_opt(2024, 1, 15).unwrap() {
        return Err(ProviderError::new(date, "sun stays below the horizon"));
    }
    lengthening(date, lat, lon, tz)
}

fn session<P: SunriseSunsetProvider>(provider: P) -> Session<P> {
    Session {
        analyzer: DayLengthAnalyzer::from_location(
            Location::new(51.5074, -0.1278).unwrap(),
            London,
            provider,
        ),
        catalog: MessageCatalog::english(),
        city: Some("London".into()),
    }
}

fn noon_jan_15() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

#[test]
fn test_message_uses_template_for_day_of_year() {
    Log::set_enabled(false);
    let text = session(lengthening).message(noon_jan_15()).unwrap();
    // January 15th is day 15; 15 % 4 picks the fourth English template
    assert_eq!(
        text,
        "The sun over London is shining 2 minutes more today than yesterday."
    );
}

#[test]
fn test_message_after_sunset_uses_past_tense() {
    Log::set_enabled(false);
    // Sunset on the 15th is at 16:30
    let evening = Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap();
    let text = session(lengthening).message(evening).unwrap();
    assert!(text.contains(" was "), "{text}");
}

#[test]
fn test_message_without_city_uses_fallback() {
    Log::set_enabled(false);
    let mut s = session(lengthening);
    s.city = None;
    let text = s.message(noon_jan_15()).unwrap();
    assert!(text.contains("your location"), "{text}");
}

#[test]
fn test_report_fields() {
    Log::set_enabled(false);
    let report = build_report(&session(lengthening), noon_jan_15()).unwrap();

    assert_eq!(report.summary.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(report.summary.delta.num_seconds(), 120);
    assert_eq!(report.summary.minutes, 2);
    assert!(report.summary.lengthening);
    assert_eq!(report.summary.tense, Tense::Present);
    assert_eq!(report.day_length_secs, 8 * 3600 + 30 * 60);
    assert_eq!(report.yesterday_day_length_secs, 8 * 3600 + 28 * 60);
    assert!(report.tomorrow.is_some());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["delta"], 120);
    assert_eq!(json["minutes"], 2);
    assert_eq!(json["lengthening"], true);
    assert_eq!(json["tense"], "present");
    assert_eq!(json["timezone"], "Europe/London");
    assert_eq!(json["city"], "London");
    assert_eq!(json["location"]["latitude"], 51.5074);
    assert!(json["message"].as_str().unwrap().contains("London"));
}

#[test]
fn test_report_fetches_each_day_once() {
    Log::set_enabled(false);
    let calls = Cell::new(0u32);
    let counting = |d: NaiveDate, lat: f64, lon: f64, tz: Tz| -> Result<SunTimes, ProviderError> {
        calls.set(calls.get() + 1);
        lengthening(d, lat, lon, tz)
    };
    let report = build_report(&session(counting), noon_jan_15()).unwrap();

    assert_eq!(calls.get(), 3);
    let tomorrow = report.tomorrow.unwrap();
    assert_eq!(
        tomorrow.day_length().num_seconds() - report.day_length_secs,
        report.day_length_secs - report.yesterday_day_length_secs
    );
}

#[test]
fn test_report_survives_missing_tomorrow() {
    Log::set_enabled(false);
    let report = build_report(&session(dark_from_16th), noon_jan_15()).unwrap();
    assert!(report.tomorrow.is_none());
    assert_eq!(report.summary.minutes, 2);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["tomorrow"].is_null());
}

#[test]
fn test_tomorrow_sunrise_and_change() {
    Log::set_enabled(false);
    let tomorrow = tomorrows_sunrise(&session(lengthening), noon_jan_15()).unwrap();

    assert_eq!(tomorrow.date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    assert_eq!(
        tomorrow.sunrise,
        London.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap()
    );
    assert_eq!(tomorrow.change.num_seconds(), 120);
    // Noon is past today's sunrise
    assert_eq!(tomorrow.next_sunrise, tomorrow.sunrise);

    let early = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
    let tomorrow = tomorrows_sunrise(&session(lengthening), early).unwrap();
    assert_eq!(
        tomorrow.next_sunrise,
        London.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
    );
}

#[test]
fn test_tomorrow_fails_when_sun_does_not_rise() {
    Log::set_enabled(false);
    let err = tomorrows_sunrise(&session(dark_from_16th), noon_jan_15()).unwrap_err();
    assert!(format!("{err:#}").contains("2024-01-16"), "{err:#}");
}

#[test]
fn test_session_from_config_file() {
    Log::set_enabled(false);
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("nb.toml"),
        r#"
daily_message = ["{city}: {numMinutes} {moreOrLess} dagslys"]
more = "mer"
less = "mindre"
minute_one = "{n} minutt"
minute_other = "{n} minutter"
"#,
    )
    .unwrap();
    let config_path = temp_dir.path().join("sol.toml");
    fs::write(
        &config_path,
        "latitude = 59.9139\nlongitude = 10.7522\ncity = \"Oslo\"\nmessages = \"nb.toml\"\n",
    )
    .unwrap();

    let config = sol::config::load_from_path(&config_path).unwrap();
    let s = Session::from_config(&config, Some(temp_dir.path()), lengthening).unwrap();

    assert_eq!(s.timezone(), chrono_tz::Europe::Oslo);
    assert_eq!(s.city.as_deref(), Some("Oslo"));
    assert_eq!(s.message(noon_jan_15()).unwrap(), "Oslo: 2 minutter mer dagslys");
}

#[test]
fn test_session_rejects_missing_catalogue() {
    Log::set_enabled(false);
    let config = Config {
        latitude: Some(59.9139),
        longitude: Some(10.7522),
        messages: Some("/nonexistent/messages.toml".into()),
        ..Config::default()
    };
    assert!(Session::from_config(&config, None, lengthening).is_err());
}
