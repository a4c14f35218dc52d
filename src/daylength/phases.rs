//! Sun times for yesterday, today and tomorrow.
//!
//! The daily message only needs today and yesterday, but the report also
//! shows when the sun comes up tomorrow. `ThreeDayPhases` fetches all three
//! days in one go so the numbers in a report agree with each other.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::{DayLengthAnalyzer, DayLengthDelta, DayLengthSummary, today_and_yesterday};
use crate::error::{ProviderError, Result};
use crate::geo::{SunTimes, SunriseSunsetProvider};

#[derive(Debug, Clone, Serialize)]
pub struct ThreeDayPhases {
    pub date: NaiveDate,
    pub yesterday: SunTimes,
    pub today: SunTimes,
    pub tomorrow: SunTimes,
}

impl ThreeDayPhases {
    /// Ask the analyzer's provider for the three days around `now`.
    pub fn compute<P: SunriseSunsetProvider>(
        analyzer: &DayLengthAnalyzer<P>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let (today, yesterday) = today_and_yesterday(&now, analyzer.timezone())?;
        let tomorrow = today
            .succ_opt()
            .ok_or_else(|| ProviderError::new(today, "no calendar day after this date"))?;

        Ok(Self {
            date: today,
            yesterday: analyzer.sun_times(yesterday)?,
            today: analyzer.sun_times(today)?,
            tomorrow: analyzer.sun_times(tomorrow)?,
        })
    }

    pub fn day_length_change(&self) -> DayLengthDelta {
        DayLengthDelta::between(&self.today, &self.yesterday)
    }

    /// Change from today to tomorrow, for "tomorrow will be N minutes longer".
    pub fn next_day_length_change(&self) -> DayLengthDelta {
        DayLengthDelta::between(&self.tomorrow, &self.today)
    }

    pub fn todays_sunset(&self) -> DateTime<Tz> {
        self.today.sunset
    }

    pub fn tomorrows_sunrise(&self) -> DateTime<Tz> {
        self.tomorrow.sunrise
    }

    /// The next sunrise after `now`: today's if it is still ahead, else tomorrow's.
    pub fn next_sunrise(&self, now: &DateTime<Utc>) -> DateTime<Tz> {
        if now.naive_utc() < self.today.sunrise.naive_utc() {
            self.today.sunrise
        } else {
            self.tomorrow.sunrise
        }
    }

    pub fn summary(&self, now: &DateTime<Utc>) -> DayLengthSummary {
        DayLengthSummary::from_days(self.date, self.today, self.yesterday, now)
    }
}
