//! Daily message composition.
//!
//! Turns a [`DayLengthSummary`] and a city name into a sentence by picking
//! a template for the day and filling in its placeholders:
//!
//! - `{city}` - the resolved city name (or the catalogue's fallback)
//! - `{numMinutes}` - the rounded minute count with its plural form
//! - `{moreOrLess}` - `more` when the day is lengthening, otherwise `less`
//! - `{tense}` - the past or present word, depending on today's sunset
//!
//! Placeholders a template does not use are simply skipped, and unknown
//! `{...}` tokens are left as written.

pub mod catalog;

use anyhow::Result;

use crate::daylength::{DayLengthSummary, Tense};

pub use catalog::MessageCatalog;

/// Template keys understood by [`DailyMessage`].
pub mod keys {
    pub const DAILY_MESSAGE: &str = "daily_message";
    pub const MORE: &str = "more";
    pub const LESS: &str = "less";
    pub const MINUTE_ONE: &str = "minute_one";
    pub const MINUTE_OTHER: &str = "minute_other";
    pub const TENSE_PAST: &str = "tense_past";
    pub const TENSE_PRESENT: &str = "tense_present";
    pub const UNKNOWN_CITY: &str = "unknown_city";
}

/// Source of localized template text.
///
/// `day_of_year` (1-based) only matters for keys backed by a rotating pool;
/// single-valued keys ignore it.
pub trait TemplateProvider {
    fn template(&self, key: &str, day_of_year: u32) -> Option<String>;
}

impl<T: TemplateProvider + ?Sized> TemplateProvider for &T {
    fn template(&self, key: &str, day_of_year: u32) -> Option<String> {
        (**self).template(key, day_of_year)
    }
}

/// Composes the daily message from a template provider.
#[derive(Debug, Clone)]
pub struct DailyMessage<T> {
    templates: T,
}

impl<T: TemplateProvider> DailyMessage<T> {
    pub fn new(templates: T) -> Self {
        Self { templates }
    }

    fn lookup(&self, key: &str, day_of_year: u32) -> Result<String> {
        self.templates
            .template(key, day_of_year)
            .ok_or_else(|| anyhow::anyhow!("Message catalogue has no '{key}' entry"))
    }

    /// "N minute(s)" using the catalogue's plural forms.
    pub fn minutes_text(&self, minutes: u32, day_of_year: u32) -> Result<String> {
        let key = if minutes == 1 {
            keys::MINUTE_ONE
        } else {
            keys::MINUTE_OTHER
        };
        let form = self.lookup(key, day_of_year)?;
        let n = minutes.to_string();
        Ok(render(&form, &[("n", n.as_str())]))
    }

    /// Build the message for `summary`.
    ///
    /// `city` of `None` uses the catalogue's `unknown_city` text.
    pub fn generate(
        &self,
        summary: &DayLengthSummary,
        city: Option<&str>,
        day_of_year: u32,
    ) -> Result<String> {
        let template = self.lookup(keys::DAILY_MESSAGE, day_of_year)?;

        let city = match city {
            Some(name) => name.to_string(),
            None => self.lookup(keys::UNKNOWN_CITY, day_of_year)?,
        };
        let num_minutes = self.minutes_text(summary.minutes, day_of_year)?;
        let more_or_less = self.lookup(
            if summary.lengthening {
                keys::MORE
            } else {
                keys::LESS
            },
            day_of_year,
        )?;
        let tense = self.lookup(
            match summary.tense {
                Tense::Past => keys::TENSE_PAST,
                Tense::Present => keys::TENSE_PRESENT,
            },
            day_of_year,
        )?;

        Ok(render(
            &template,
            &[
                ("city", city.as_str()),
                ("numMinutes", num_minutes.as_str()),
                ("moreOrLess", more_or_less.as_str()),
                ("tense", tense.as_str()),
            ],
        ))
    }
}

/// Replace `{name}` tokens in one pass.
///
/// Substituted text is never scanned again, so a city called "{tense}"
/// stays "{tense}".
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
