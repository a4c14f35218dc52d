//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

/// What to print once configuration is loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Today's daily message (the default)
    Message,
    /// Detailed day-length report
    Report,
    /// Tomorrow's sunrise
    Tomorrow,
    /// Write (or update) the configuration file for these coordinates
    Init { latitude: f64, longitude: f64 },
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run a command with these settings
    Run {
        command: Command,
        debug_enabled: bool,
        config_dir: Option<String>,
        /// Pinned local time, "YYYY-MM-DD HH:MM:SS"
        at: Option<String>,
        json: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Rough shape check for "YYYY-MM-DD HH:MM:SS"; real parsing needs the timezone.
fn looks_like_datetime(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 19
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[10] == b' '
        && bytes[13] == b':'
        && bytes[16] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7 | 10 | 13 | 16) || b.is_ascii_digit())
}

fn command_from_name(name: &str) -> Option<Command> {
    match name {
        "message" | "m" => Some(Command::Message),
        "report" | "r" => Some(Command::Report),
        "tomorrow" | "t" => Some(Command::Tomorrow),
        // Coordinates are filled in as they are parsed
        "init" | "i" => Some(Command::Init {
            latitude: f64::NAN,
            longitude: f64::NAN,
        }),
        _ => None,
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first element is the program name and is skipped. Flags may
    /// appear before or after the command. `init` takes two numbers, which
    /// may be negative.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut json = false;
        let mut unknown_arg_found = false;
        let mut config_dir: Option<String> = None;
        let mut at: Option<String> = None;
        let mut command: Option<Command> = None;
        let mut init_coords: Vec<f64> = Vec::new();

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = args_vec[i].as_str();

            // init coordinates first, so "-0.1278" is not taken for a flag
            if matches!(command, Some(Command::Init { .. }))
                && init_coords.len() < 2
                && let Ok(value) = arg_str.parse::<f64>()
            {
                init_coords.push(value);
                i += 1;
                continue;
            }

            match arg_str {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" => {
                    // Parse: --config <directory>
                    if i + 1 < args_vec.len() && !args_vec[i + 1].starts_with('-') {
                        config_dir = Some(args_vec[i + 1].clone());
                        i += 1;
                    } else {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                }
                "--at" | "-a" => {
                    // Parse: --at "YYYY-MM-DD HH:MM:SS"
                    match args_vec.get(i + 1) {
                        Some(value) if looks_like_datetime(value) => {
                            at = Some(value.clone());
                            i += 1;
                        }
                        Some(value) if !value.starts_with('-') => {
                            log_error!(
                                "Invalid time format: '{}'. Use YYYY-MM-DD HH:MM:SS",
                                value
                            );
                            unknown_arg_found = true;
                            i += 1;
                        }
                        _ => {
                            log_warning!(
                                "Missing time for --at. Usage: --at \"YYYY-MM-DD HH:MM:SS\""
                            );
                            unknown_arg_found = true;
                        }
                    }
                }
                _ if arg_str.starts_with('-') => {
                    log_warning!("Unknown option: {arg_str}");
                    unknown_arg_found = true;
                }
                _ => match (&command, command_from_name(arg_str)) {
                    (None, Some(parsed)) => command = Some(parsed),
                    (None, None) => {
                        log_warning!("Unknown command: {arg_str}");
                        unknown_arg_found = true;
                    }
                    (Some(_), Some(_)) => {
                        log_error!("Cannot use multiple commands at once: '{arg_str}'");
                        unknown_arg_found = true;
                    }
                    (Some(_), None) => {
                        log_warning!("Unexpected argument: {arg_str}");
                        unknown_arg_found = true;
                    }
                },
            }
            i += 1;
        }

        if let Some(Command::Init { .. }) = command {
            match init_coords.as_slice() {
                [latitude, longitude] => {
                    command = Some(Command::Init {
                        latitude: *latitude,
                        longitude: *longitude,
                    });
                }
                _ if !(display_help || display_version) => {
                    log_warning!(
                        "Missing coordinates for init. Usage: sol init <latitude> <longitude>"
                    );
                    unknown_arg_found = true;
                }
                _ => {}
            }
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else {
            CliAction::Run {
                command: command.unwrap_or(Command::Message),
                debug_enabled,
                config_dir,
                at,
                json,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_decorated!(env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("sol [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-a, --at <time>        Pretend it is this local time (\"YYYY-MM-DD HH:MM:SS\")");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-j, --json             Print machine-readable JSON instead");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("message, m             Print today's daylight message (default)");
    log_indented!("report, r              Print sunrise, sunset and day length details");
    log_indented!("tomorrow, t            Print tomorrow's sunrise");
    log_indented!("init, i <lat> <lon>    Create or update the configuration file");
    log_end!();
}
