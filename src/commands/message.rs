//! `sol message`: print today's daylight message.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::Session;
use crate::daylength::today_and_yesterday;
use crate::geo::SunriseSunsetProvider;
use crate::logger::Log;

#[derive(Debug, Serialize)]
struct MessageOutput<'a> {
    date: NaiveDate,
    city: Option<&'a str>,
    message: &'a str,
}

/// Print the message, or a small JSON object with `json`.
pub fn handle_message_command<P: SunriseSunsetProvider>(
    session: &Session<P>,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let message = session.message(now)?;

    if json {
        let output = MessageOutput {
            date: today_and_yesterday(&now, session.timezone())?.0,
            city: session.city.as_deref(),
            message: &message,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if Log::is_debug() {
        log_block_start!("{message}");
        log_end!();
    } else {
        println!("{message}");
    }

    Ok(())
}
