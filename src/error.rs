//! Error types for day-length calculations.
//!
//! The core keeps a typed error so callers can tell a bad location apart
//! from a provider that has no answer for a date. Everything above the core
//! (configuration, CLI) wraps these into `anyhow::Error`.

use chrono::NaiveDate;
use std::fmt;

/// Result type alias for the day-length core.
pub type Result<T> = std::result::Result<T, DayLengthError>;

/// Errors that can occur while analysing day length.
#[derive(Debug, Clone, PartialEq)]
pub enum DayLengthError {
    /// Latitude or longitude outside -90..=90 / -180..=180 (or not finite).
    InvalidLocation {
        /// The latitude supplied.
        latitude: f64,
        /// The longitude supplied.
        longitude: f64,
    },
    /// The sunrise/sunset provider could not produce times for a date.
    Provider(ProviderError),
}

/// Failure reported by a sunrise/sunset provider for a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    /// The date the provider was asked about.
    pub date: NaiveDate,
    /// Human-readable reason.
    pub reason: String,
}

impl ProviderError {
    pub fn new(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            date,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no sun times for {}: {}", self.date, self.reason)
    }
}

impl std::error::Error for ProviderError {}

impl fmt::Display for DayLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocation {
                latitude,
                longitude,
            } => write!(
                f,
                "invalid location ({latitude}°, {longitude}°): latitude must be between -90° and +90°, longitude between -180° and +180°"
            ),
            Self::Provider(err) => write!(f, "sunrise/sunset provider failed: {err}"),
        }
    }
}

impl std::error::Error for DayLengthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::InvalidLocation { .. } => None,
        }
    }
}

impl From<ProviderError> for DayLengthError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl DayLengthError {
    /// Creates an invalid location error.
    #[must_use]
    pub const fn invalid_location(latitude: f64, longitude: f64) -> Self {
        Self::InvalidLocation {
            latitude,
            longitude,
        }
    }

    /// The date the provider failed on, if this is a provider error.
    pub fn failed_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Provider(err) => Some(err.date),
            Self::InvalidLocation { .. } => None,
        }
    }
}
