//! Structured logging with box-drawing output.
//!
//! The CLI prints its report and diagnostics as a vertical "pipe" of lines:
//!
//! ```text
//! ┏ sol v0.3.0 ━━╸
//! ┃
//! ┣ Day length in London
//! ┃   Sunrise: 07:58:12
//! ┃   Sunset:  16:23:40
//! ┣[INFO] Days are getting longer
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new block (prints a spacer pipe first).
//! - `log_decorated!` continues a block with `┣ message`.
//! - `log_indented!` prints details under the current line (`┃   message`).
//! - `log_pipe!` inserts an empty `┃` line, mostly before a level-tagged message.
//! - `log_version!` / `log_end!` open and close the whole output.
//! - `log_info!`, `log_warning!`, `log_error!` carry a coloured `[LEVEL]` tag.
//! - `log_debug!` does the same but only prints when debug output is on.
//! - `log_error_exit!` closes the pipe with an error (`┗[ERROR] message`).
//!
//! Logging can be switched off entirely (tests, `--json` output) and debug
//! lines are opt-in through `--debug`.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Zone used for the pinned-time prefix
static DISPLAY_TIMEZONE: OnceLock<chrono_tz::Tz> = OnceLock::new();

/// Logging switches and helpers used by the macros.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` lines.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        Self::is_enabled() && DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Zone in which pinned timestamps are shown. First call wins.
    pub fn set_display_timezone(tz: chrono_tz::Tz) {
        let _ = DISPLAY_TIMEZONE.set(tz);
    }

    /// `[YYYY-MM-DD HH:MM:SS] ` when the clock is pinned with `--at`, else empty.
    ///
    /// Makes it obvious in the output that the numbers are not for the real now.
    pub fn get_timestamp_prefix() -> String {
        if !(crate::time_source::is_initialized() && crate::time_source::is_pinned()) {
            return String::new();
        }
        let now = crate::time_source::now();
        match DISPLAY_TIMEZONE.get() {
            Some(tz) => format!("[{}] ", now.with_timezone(tz).format(crate::constants::DATETIME_FORMAT)),
            None => format!("[{}Z] ", now.format(crate::constants::DATETIME_FORMAT)),
        }
    }
}

/// Write a formatted log line to stdout.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Format `message` behind `marker` and the timestamp prefix, then write it.
#[doc(hidden)]
pub fn emit(marker: &str, message: &str) {
    let prefix = Log::get_timestamp_prefix();
    write_output(&format!("{prefix}{marker}{message}\n"));
}

/// Like [`emit`] but prints a spacer pipe line first.
#[doc(hidden)]
pub fn emit_spaced(marker: &str, message: &str) {
    let prefix = Log::get_timestamp_prefix();
    write_output(&format!("{prefix}┃\n{prefix}{marker}{message}\n"));
}

// # Logging Macros

#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($emit:ident, $marker:expr, $fmt:literal $($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::$emit($marker, &format!($fmt $($arg)*));
        }
    }};
    ($emit:ident, $marker:expr, $expr:expr) => {{
        if $crate::logger::Log::is_enabled() {
            let expr = $expr;
            $crate::logger::$emit($marker, &format!("{expr}"));
        }
    }};
}

/// Continue a block with `┣ message`.
#[macro_export]
macro_rules! log_decorated {
    ($($t:tt)+) => { $crate::__log_line!(emit, "┣ ", $($t)+) };
}

/// Detail line under the current message.
#[macro_export]
macro_rules! log_indented {
    ($($t:tt)+) => { $crate::__log_line!(emit, "┃   ", $($t)+) };
}

/// Start a new block.
#[macro_export]
macro_rules! log_block_start {
    ($($t:tt)+) => { $crate::__log_line!(emit_spaced, "┣ ", $($t)+) };
}

/// Empty pipe line for spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::emit("┃", "");
        }
    }};
}

/// Header with the crate version.
#[macro_export]
macro_rules! log_version {
    () => {{
        if $crate::logger::Log::is_enabled() {
            let version = env!("CARGO_PKG_VERSION");
            $crate::logger::emit("┏ ", &format!("sol v{version} ━━╸"));
        }
    }};
}

/// Final terminator.
#[macro_export]
macro_rules! log_end {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::emit("╹", "");
        }
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($t:tt)+) => { $crate::__log_line!(emit, "┣[\x1b[32mINFO\x1b[0m] ", $($t)+) };
}

#[macro_export]
macro_rules! log_warning {
    ($($t:tt)+) => { $crate::__log_line!(emit, "┣[\x1b[33mWARNING\x1b[0m] ", $($t)+) };
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)+) => { $crate::__log_line!(emit, "┣[\x1b[31mERROR\x1b[0m] ", $($t)+) };
}

/// Close the pipe with an error line.
#[macro_export]
macro_rules! log_error_exit {
    ($($t:tt)+) => { $crate::__log_line!(emit_spaced, "┗[\x1b[31mERROR\x1b[0m] ", $($t)+) };
}

/// Debug line, printed only with `--debug`.
#[macro_export]
macro_rules! log_debug {
    ($($t:tt)+) => {{
        if $crate::logger::Log::is_debug() {
            $crate::__log_line!(emit, "┣[\x1b[36mDEBUG\x1b[0m] ", $($t)+)
        }
    }};
}
