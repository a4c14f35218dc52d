//! # Sol Library
//!
//! Works out how much longer (or shorter) today is than yesterday, and says
//! so in a sentence.
//!
//! This library backs the `sol` binary and keeps the calculation testable
//! apart from CLI dispatch (main.rs).
//!
//! ## Architecture
//!
//! - **Core**: `daylength` computes the day-length delta, its rounded minute
//!   magnitude and the message tense from a pluggable sunrise/sunset provider
//! - **Geographic**: `geo` holds locations, the `sunrise`-crate provider,
//!   timezone detection and the nearest-city lookup
//! - **Messages**: `message` turns a day-length summary into text from a
//!   localizable template catalogue
//! - **Configuration**: `config` for the TOML settings file
//! - **Commands**: `commands` for the CLI subcommands (message, report, tomorrow, init)
//! - **Infrastructure**: logging, typed errors and the injectable time source
//!
//! ```no_run
//! use chrono::Utc;
//! use sol::daylength::DayLengthAnalyzer;
//! use sol::geo::SolarProvider;
//!
//! let analyzer =
//!     DayLengthAnalyzer::new(51.5074, -0.1278, chrono_tz::Europe::London, SolarProvider::new())?;
//! let summary = analyzer.summarize(Utc::now())?;
//! println!("{} minutes, lengthening: {}", summary.minutes, summary.lengthening);
//! # Ok::<(), sol::error::DayLengthError>(())
//! ```

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod daylength;
pub mod error;
pub mod geo;
pub mod message;
pub mod time_source;

pub use daylength::{
    DayLengthAnalyzer, DayLengthDelta, DayLengthSummary, Tense, compute_delta, tense_of,
};
pub use error::{DayLengthError, ProviderError};
