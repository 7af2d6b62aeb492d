//! Logger initialisation.
//!
//! Messages go through the `log` facade and are dispatched by `fern`:
//! info and below to stdout, warnings and errors to stderr. Levels are
//! coloured when the stream is a terminal.

use std::env;
use std::fmt::{Arguments, Display};
use std::io::IsTerminal;
use std::sync::OnceLock;

use anyhow::{Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};

/// Environment variable that overrides the configured log level.
pub const LOG_LEVEL_ENV: &str = "SWAP_SIZER_LOG_LEVEL";

/// Level used when neither the environment nor the scenario sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted level names.
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Whether [`init`] has already installed the logger.
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Resolves the effective level: environment first, then config, then default.
///
/// # Errors
///
/// Returns an error if the chosen level name is not recognised.
pub fn resolve_level(level_from_config: Option<&str>) -> Result<LevelFilter> {
    let level = env::var(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| level_from_config.unwrap_or(DEFAULT_LOG_LEVEL).to_string());
    parse_level(&level)
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    Ok(match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    })
}

/// Installs the global logger. Calling it again is a no-op.
///
/// # Errors
///
/// Returns an error if the level is unknown or another logger is already set.
pub fn init(level_from_config: Option<&str>) -> Result<()> {
    if is_logger_initialised() {
        return Ok(());
    }

    let log_level = resolve_level(level_from_config)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        )
        .apply()?;

    let _ = LOGGER_INIT.set(());
    Ok(())
}

fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}
