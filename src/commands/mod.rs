//! Command-line command handlers for sol.
//!
//! Each command lives in its own submodule. Everything a command needs
//! (location, timezone, provider, catalogue, city name) is gathered once in
//! a [`Session`] so the handlers themselves stay small and testable.

pub mod init;
pub mod message;
pub mod report;
pub mod tomorrow;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use std::path::Path;

use crate::config::Config;
use crate::daylength::DayLengthAnalyzer;
use crate::geo::SunriseSunsetProvider;
use crate::logger::Log;
use crate::message::{DailyMessage, MessageCatalog};

/// Resolved inputs shared by the reporting commands.
pub struct Session<P> {
    pub analyzer: DayLengthAnalyzer<P>,
    pub catalog: MessageCatalog,
    /// `None` when no city name could be determined
    pub city: Option<String>,
}

impl<P: SunriseSunsetProvider> Session<P> {
    /// Resolve everything `config` describes.
    ///
    /// `base_dir` is where relative catalogue paths are looked up.
    pub fn from_config(config: &Config, base_dir: Option<&Path>, provider: P) -> Result<Self> {
        let location = config.location()?;
        let tz = config.resolve_timezone(&location)?;
        let catalog = config
            .message_catalog(base_dir)
            .context("Failed to load message catalogue")?;
        let city = config.city_resolver().name_for(&location);

        if Log::is_debug() {
            config.log_config(&location, tz);
        }
        log_debug!(
            "City for messages: {}",
            city.as_deref().unwrap_or("(none found)")
        );

        Ok(Self {
            analyzer: DayLengthAnalyzer::from_location(location, tz, provider),
            catalog,
            city,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.analyzer.timezone()
    }

    /// Today's composed message.
    pub fn message(&self, now: DateTime<Utc>) -> Result<String> {
        let summary = self.analyzer.summarize(now)?;
        DailyMessage::new(&self.catalog).generate(
            &summary,
            self.city.as_deref(),
            summary.date.ordinal(),
        )
    }
}
