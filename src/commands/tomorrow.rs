//! `sol tomorrow`: when the sun comes up tomorrow.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::Session;
use crate::constants::{DATETIME_FORMAT, TIME_FORMAT};
use crate::daylength::DayLengthDelta;
use crate::daylength::phases::ThreeDayPhases;
use crate::geo::SunriseSunsetProvider;
use crate::logger::Log;

#[derive(Debug, Clone, Serialize)]
pub struct TomorrowOutput {
    pub date: NaiveDate,
    pub sunrise: DateTime<Tz>,
    /// Tomorrow's day length minus today's
    pub change: DayLengthDelta,
    /// Earliest sunrise still ahead of `now`
    pub next_sunrise: DateTime<Tz>,
}

pub fn tomorrows_sunrise<P: SunriseSunsetProvider>(
    session: &Session<P>,
    now: DateTime<Utc>,
) -> Result<TomorrowOutput> {
    let phases = ThreeDayPhases::compute(&session.analyzer, now)?;
    Ok(TomorrowOutput {
        date: phases.tomorrow.sunrise.date_naive(),
        sunrise: phases.tomorrows_sunrise(),
        change: phases.next_day_length_change(),
        next_sunrise: phases.next_sunrise(&now),
    })
}

pub fn handle_tomorrow_command<P: SunriseSunsetProvider>(
    session: &Session<P>,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let tomorrow = tomorrows_sunrise(session, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tomorrow)?);
        return Ok(());
    }

    if !Log::is_debug() {
        println!("{}", tomorrow.sunrise.format(TIME_FORMAT));
        return Ok(());
    }

    log_block_start!("Tomorrow ({})", tomorrow.date);
    log_indented!("Sunrise:      {}", tomorrow.sunrise.format(TIME_FORMAT));
    log_indented!("Change:       {}", tomorrow.change);
    log_indented!("Next sunrise: {}", tomorrow.next_sunrise.format(DATETIME_FORMAT));
    log_end!();
    Ok(())
}
