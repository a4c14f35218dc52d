//! `sol report`: sunrise, sunset and day-length details.

use anyhow::Result;
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::Serialize;

use super::Session;
use crate::constants::TIME_FORMAT;
use crate::daylength::{DayLengthSummary, Tense, ThreeDayPhases};
use crate::geo::{Location, SunTimes, SunriseSunsetProvider};
use crate::message::{DailyMessage, MessageCatalog};

/// Everything the report shows, in one serializable bundle.
#[derive(Debug, Clone, Serialize)]
pub struct DayLengthReport {
    pub location: Location,
    pub timezone: String,
    pub city: Option<String>,
    #[serde(flatten)]
    pub summary: DayLengthSummary,
    pub day_length_secs: i64,
    pub yesterday_day_length_secs: i64,
    /// Missing when the sun does not rise tomorrow
    pub tomorrow: Option<SunTimes>,
    pub message: String,
}

/// Gather the report for `now`.
///
/// All three days come from one [`ThreeDayPhases`] fetch. If that fails,
/// today and yesterday are fetched alone: a failure for tomorrow only drops
/// that part of the report, while today's and yesterday's numbers are required.
pub fn build_report<P: SunriseSunsetProvider>(
    session: &Session<P>,
    now: DateTime<Utc>,
) -> Result<DayLengthReport> {
    let (summary, tomorrow) = match ThreeDayPhases::compute(&session.analyzer, now) {
        Ok(phases) => (phases.summary(&now), Some(phases.tomorrow)),
        Err(e) => {
            let summary = session.analyzer.summarize(now)?;
            log_warning!("Tomorrow's sun times are unavailable: {e}");
            (summary, None)
        }
    };

    let message = DailyMessage::new(&session.catalog).generate(
        &summary,
        session.city.as_deref(),
        summary.date.ordinal(),
    )?;

    Ok(DayLengthReport {
        location: *session.analyzer.location(),
        timezone: session.timezone().name().to_string(),
        city: session.city.clone(),
        day_length_secs: summary.today.day_length().num_seconds(),
        yesterday_day_length_secs: summary.yesterday.day_length().num_seconds(),
        summary,
        tomorrow,
        message,
    })
}

/// Print the report through the logger, or as JSON with `json`.
pub fn handle_report_command<P: SunriseSunsetProvider>(
    session: &Session<P>,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let report = build_report(session, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = &report.summary;
    let place = place_name(&report, &session.catalog);

    log_block_start!("Day length in {place} ({})", report.timezone);
    log_indented!("Location:  {}", report.location);
    log_indented!("Date:      {}", summary.date);
    log_indented!("Sunrise:   {}", summary.today.sunrise.format(TIME_FORMAT));
    log_indented!("Sunset:    {}", summary.today.sunset.format(TIME_FORMAT));
    log_indented!("Length:    {}", format_duration(summary.today.day_length()));
    log_indented!(
        "Yesterday: {}",
        format_duration(summary.yesterday.day_length())
    );
    log_indented!(
        "Change:    {} ({} {})",
        summary.delta,
        summary.minutes,
        direction_word(&session.catalog, summary.lengthening)
    );
    match &report.tomorrow {
        Some(times) => log_indented!("Tomorrow:  sunrise {}", times.sunrise.format(TIME_FORMAT)),
        None => log_indented!("Tomorrow:  no sunrise"),
    }

    match summary.tense {
        Tense::Past => log_info!("The sun has set for today"),
        Tense::Present => log_info!("The sun has not set yet"),
    }
    log_block_start!("{}", report.message);
    log_end!();

    Ok(())
}

/// The report's city, or the catalogue's word for an unknown one.
fn place_name<'a>(report: &'a DayLengthReport, catalog: &'a MessageCatalog) -> &'a str {
    report.city.as_deref().unwrap_or(&catalog.unknown_city)
}

fn direction_word(catalog: &MessageCatalog, lengthening: bool) -> &str {
    if lengthening { &catalog.more } else { &catalog.less }
}

/// "8h 25m 28s"; negative spans get a leading minus.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!(
        "{sign}{}h {:02}m {:02}s",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daylength::DayLengthAnalyzer;
    use crate::error::ProviderError;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::{Europe::Oslo, Tz};

    fn fixed_day(d: NaiveDate, _: f64, _: f64, tz: Tz) -> std::result::Result<SunTimes, ProviderError> {
        let sunrise = tz
            .from_local_datetime(&d.and_hms_opt(9, 0, 0).unwrap())
            .single()
            .unwrap();
        SunTimes::new(d, sunrise, sunrise + TimeDelta::hours(6))
    }

    fn norwegian() -> MessageCatalog {
        MessageCatalog {
            more: "mer".into(),
            less: "mindre".into(),
            unknown_city: "her".into(),
            ..MessageCatalog::english()
        }
    }

    #[test]
    fn test_report_words_come_from_catalogue() {
        let session = Session {
            analyzer: DayLengthAnalyzer::from_location(
                Location::new(59.9139, 10.7522).unwrap(),
                Oslo,
                fixed_day,
            ),
            catalog: norwegian(),
            city: None,
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let report = build_report(&session, now).unwrap();

        assert_eq!(place_name(&report, &session.catalog), "her");
        assert_eq!(direction_word(&session.catalog, true), "mer");
        assert_eq!(direction_word(&session.catalog, report.summary.lengthening), "mindre");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::seconds(30328)), "8h 25m 28s");
        assert_eq!(format_duration(TimeDelta::zero()), "0h 00m 00s");
        assert_eq!(format_duration(TimeDelta::seconds(-61)), "-0h 01m 01s");
        assert_eq!(format_duration(TimeDelta::hours(24)), "24h 00m 00s");
    }
}
