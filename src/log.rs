//! Construction of the global `env_logger` backend.
//!
//! `RUST_LOG` takes precedence over the level passed by the caller. Calling any of the
//! builders more than once keeps the first logger.

use std::io::Write;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

pub fn build_pace_logger_for_level(level: LevelFilter) {
    build_pace_logger(level, true);
}

/// Raises `default` by one level per `-v`
pub fn build_pace_logger_for_verbosity(default: LevelFilter, verbosity: usize) {
    build_pace_logger_for_level(level_for_verbosity(default, verbosity));
}

/// Writes `[LEVEL] message` lines to stderr; the level label is colored unless `color`
/// is false or stderr is not a terminal.
pub fn build_pace_logger(level: LevelFilter, color: bool) {
    install(builder(color).filter_level(level));
}

/// Target of the lines reporting a verified instance. They are shown at every
/// [`LogLevel`] except `none`, and they are the only lines shown at `success`.
pub const SUCCESS_TARGET: &str = "tww::success";

/// Level names of the batch driver's `--log-level` option
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Success,
    Filter(LevelFilter),
}

/// Same as [`build_pace_logger`] but keeps the lines of [`SUCCESS_TARGET`] above errors
pub fn build_batch_logger(level: LogLevel, color: bool) {
    let mut builder = builder(color);
    for (module, filter) in batch_directives(level) {
        builder.filter(module, filter);
    }
    install(&mut builder);
}

fn builder(color: bool) -> Builder {
    let mut builder = Builder::new();
    builder
        .write_style(if color {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        })
        .format(|buf, record| {
            let level = buf.default_styled_level(record.level());
            writeln!(buf, "[{level:>5}] {}", record.args())
        });
    builder
}

fn install(builder: &mut Builder) {
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let _ = builder.try_init();
}

fn batch_directives(level: LogLevel) -> [(Option<&'static str>, LevelFilter); 2] {
    let (global, success) = match level {
        LogLevel::Success => (LevelFilter::Off, LevelFilter::Info),
        LogLevel::Filter(LevelFilter::Off) => (LevelFilter::Off, LevelFilter::Off),
        LogLevel::Filter(level) => (level, level.max(LevelFilter::Info)),
    };
    [(None, global), (Some(SUCCESS_TARGET), success)]
}

fn level_for_verbosity(default: LevelFilter, verbosity: usize) -> LevelFilter {
    let base = LEVELS.iter().position(|&l| l == default).unwrap_or(0);
    LEVELS[(base + verbosity).min(LEVELS.len() - 1)]
}

/// Parses the level names of the batch driver's `--log-level` option. `crit` only shows
/// errors, `success` only verified instances, `all` shows everything, and `none`
/// disables logging.
pub fn parse_level_name(name: &str) -> Result<LogLevel, String> {
    let filter = match name.to_ascii_lowercase().as_str() {
        "success" => return Ok(LogLevel::Success),
        "none" | "off" => LevelFilter::Off,
        "crit" | "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" | "all" => LevelFilter::Trace,
        _ => return Err(format!("unknown log level {name:?}")),
    };
    Ok(LogLevel::Filter(filter))
}
