//! Main application entry point and high-level flow coordination.
//!
//! After argument parsing this module wires the pieces together:
//!
//! - `args`: Command-line argument parsing and help/version display
//! - `config`: Configuration loading and validation
//! - `time_source`: The real clock, or the instant pinned with `--at`
//! - `commands`: One handler per subcommand
//! - `logger`: Centralized logging functionality
//!
//! Every command runs once and exits: 0 on success, 1 on any error. Errors
//! close the log pipe with an `[ERROR]` line, or go to stderr when `--json`
//! keeps stdout machine-readable.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use sol::args::{self, CliAction, Command, ParsedArgs};
use sol::commands::{self, Session};
use sol::config::{self, Config};
use sol::constants::{DATETIME_FORMAT, EXIT_FAILURE, EXIT_SUCCESS};
use sol::geo::SolarProvider;
use sol::logger::Log;
use sol::time_source::{self, FixedTimeSource};
use sol::{log_debug, log_end, log_error_exit, log_pipe, log_version};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let exit_code = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::Run {
            command,
            debug_enabled,
            config_dir,
            at,
            json,
        } => {
            // JSON output owns stdout
            Log::set_enabled(!json);
            Log::set_debug(debug_enabled);

            if debug_enabled || matches!(command, Command::Report | Command::Init { .. }) {
                log_version!();
            }
            if debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled");
            }

            match run(command, config_dir, at, json) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) if json => {
                    eprintln!("error: {e:#}");
                    EXIT_FAILURE
                }
                Err(e) => {
                    log_error_exit!("{e:#}");
                    log_end!();
                    EXIT_FAILURE
                }
            }
        }
    };

    std::process::exit(exit_code);
}

fn run(command: Command, config_dir: Option<String>, at: Option<String>, json: bool) -> Result<()> {
    config::set_config_dir(config_dir)?;

    match command {
        Command::Init {
            latitude,
            longitude,
        } => commands::init::handle_init_command(latitude, longitude),
        Command::Message => {
            let (session, now) = prepare(at)?;
            commands::message::handle_message_command(&session, now, json)
        }
        Command::Report => {
            let (session, now) = prepare(at)?;
            commands::report::handle_report_command(&session, now, json)
        }
        Command::Tomorrow => {
            let (session, now) = prepare(at)?;
            commands::tomorrow::handle_tomorrow_command(&session, now, json)
        }
    }
}

/// Load the configuration, pin the clock if asked, and build the session.
fn prepare(at: Option<String>) -> Result<(Session<SolarProvider>, DateTime<Utc>)> {
    let config = Config::load()?;
    let location = config.location()?;
    let tz = config.resolve_timezone(&location)?;
    Log::set_display_timezone(tz);

    if let Some(at) = at {
        let instant = time_source::parse_datetime_in_tz(&at, tz).map_err(anyhow::Error::msg)?;
        time_source::init_time_source(Arc::new(FixedTimeSource::new(instant)));
    }
    let now = time_source::now();
    log_debug!(
        "Local time: {} ({tz})",
        now.with_timezone(&tz).format(DATETIME_FORMAT)
    );

    let base_dir = config::loading::get_config_base_dir().ok();
    let session = Session::from_config(&config, base_dir.as_deref(), SolarProvider::new())?;
    Ok((session, now))
}
