//! Localized strings for the daily message.
//!
//! A catalogue is a small TOML file:
//!
//! ```toml
//! daily_message = [
//!     "There {tense} {numMinutes} {moreOrLess} daylight in {city} today than yesterday.",
//! ]
//! more = "more"
//! less = "less"
//! minute_one = "{n} minute"
//! minute_other = "{n} minutes"
//! tense_past = "was"
//! tense_present = "is"
//! unknown_city = "your location"
//! ```
//!
//! Every field except `daily_message` falls back to the built-in English
//! value when missing, so a translation can start from the templates alone.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::{TemplateProvider, keys};

const ENGLISH_DAILY_MESSAGES: &[&str] = &[
    "There {tense} {numMinutes} {moreOrLess} daylight in {city} today than yesterday.",
    "In {city} there {tense} {numMinutes} {moreOrLess} sun today compared to yesterday.",
    "{city} {tense} seeing {numMinutes} {moreOrLess} daylight today than yesterday.",
    "The sun over {city} {tense} shining {numMinutes} {moreOrLess} today than yesterday.",
];

/// A set of message templates and the words substituted into them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageCatalog {
    pub daily_message: Vec<String>,
    #[serde(default = "english::more")]
    pub more: String,
    #[serde(default = "english::less")]
    pub less: String,
    #[serde(default = "english::minute_one")]
    pub minute_one: String,
    #[serde(default = "english::minute_other")]
    pub minute_other: String,
    #[serde(default = "english::tense_past")]
    pub tense_past: String,
    #[serde(default = "english::tense_present")]
    pub tense_present: String,
    #[serde(default = "english::unknown_city")]
    pub unknown_city: String,
}

mod english {
    pub fn more() -> String {
        "more".to_string()
    }
    pub fn less() -> String {
        "less".to_string()
    }
    pub fn minute_one() -> String {
        "{n} minute".to_string()
    }
    pub fn minute_other() -> String {
        "{n} minutes".to_string()
    }
    pub fn tense_past() -> String {
        "was".to_string()
    }
    pub fn tense_present() -> String {
        "is".to_string()
    }
    pub fn unknown_city() -> String {
        "your location".to_string()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageCatalog {
    /// The built-in English catalogue.
    pub fn english() -> Self {
        Self {
            daily_message: ENGLISH_DAILY_MESSAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            more: english::more(),
            less: english::less(),
            minute_one: english::minute_one(),
            minute_other: english::minute_other(),
            tense_past: english::tense_past(),
            tense_present: english::tense_present(),
            unknown_city: english::unknown_city(),
        }
    }

    /// Parse and validate a catalogue from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: MessageCatalog =
            toml::from_str(content).context("Failed to parse message catalogue")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalogue file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalogue {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid message catalogue {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.daily_message.is_empty() {
            anyhow::bail!("daily_message must contain at least one template");
        }
        if let Some(idx) = self.daily_message.iter().position(|t| t.trim().is_empty()) {
            anyhow::bail!("daily_message[{idx}] is empty");
        }
        for (name, value) in [
            (keys::MORE, &self.more),
            (keys::LESS, &self.less),
            (keys::TENSE_PAST, &self.tense_past),
            (keys::TENSE_PRESENT, &self.tense_present),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must not be empty");
            }
        }
        for (name, value) in [
            (keys::MINUTE_ONE, &self.minute_one),
            (keys::MINUTE_OTHER, &self.minute_other),
        ] {
            if !value.contains("{n}") {
                anyhow::bail!("{name} must contain the {{n}} placeholder (got \"{value}\")");
            }
        }
        Ok(())
    }
}

impl TemplateProvider for MessageCatalog {
    fn template(&self, key: &str, day_of_year: u32) -> Option<String> {
        let value = match key {
            keys::DAILY_MESSAGE => {
                let idx = day_of_year as usize % self.daily_message.len().max(1);
                return self.daily_message.get(idx).cloned();
            }
            keys::MORE => &self.more,
            keys::LESS => &self.less,
            keys::MINUTE_ONE => &self.minute_one,
            keys::MINUTE_OTHER => &self.minute_other,
            keys::TENSE_PAST => &self.tense_past,
            keys::TENSE_PRESENT => &self.tense_present,
            keys::UNKNOWN_CITY => &self.unknown_city,
            _ => return None,
        };
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_catalog_is_valid() {
        assert!(MessageCatalog::english().validate().is_ok());
    }

    #[test]
    fn test_rotation_by_day_of_year() {
        let catalog = MessageCatalog::english();
        let len = catalog.daily_message.len() as u32;
        for day in 1..=366 {
            let expected = &catalog.daily_message[(day % len) as usize];
            assert_eq!(
                catalog.template(keys::DAILY_MESSAGE, day).as_ref(),
                Some(expected)
            );
        }
        // day 1 uses the second entry, as day_of_year % len
        assert_eq!(
            catalog.template(keys::DAILY_MESSAGE, 1),
            Some(catalog.daily_message[1].clone())
        );
    }

    #[test]
    fn test_partial_catalog_falls_back_to_english() {
        let catalog = MessageCatalog::from_toml_str(
            r#"
daily_message = ["Solen i {city}: {numMinutes} {moreOrLess}."]
more = "mer"
less = "mindre"
"#,
        )
        .unwrap();
        assert_eq!(catalog.more, "mer");
        assert_eq!(catalog.minute_other, "{n} minutes");
        assert_eq!(catalog.daily_message.len(), 1);
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let err = MessageCatalog::from_toml_str("daily_message = []").unwrap_err();
        assert!(format!("{err:#}").contains("at least one template"));
    }

    #[test]
    fn test_plural_forms_need_placeholder() {
        let err = MessageCatalog::from_toml_str(
            r#"
daily_message = ["x"]
minute_one = "one minute"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("minute_one"));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(MessageCatalog::english().template("nope", 1), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.toml");
        std::fs::write(&path, "daily_message = [\"{city}\"]\n").unwrap();
        let catalog = MessageCatalog::load(&path).unwrap();
        assert_eq!(catalog.daily_message, vec!["{city}".to_string()]);

        assert!(MessageCatalog::load(&dir.path().join("missing.toml")).is_err());
    }
}
