//! Severity levels and their mapping onto `slog` levels.
//!
//! `slog` has six levels; this crate exposes seven plus `disabled`. `fatal` and
//! `panic` both map to `slog::Level::Critical` and are told apart by the record
//! tag, which always carries [`Level::as_str`] for records built by this crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum severity of a logger, or the severity of a single record.
///
/// Levels are ordered from least to most severe; `Disabled` sorts above every
/// record level so a logger set to it lets nothing through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
    Disabled,
}

impl Level {
    /// Lower-case name, as written to the `severity` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
            Self::Disabled => "disabled",
        }
    }

    /// Parses `value`, falling back to [`Level::Debug`] when it is not a level name.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub(crate) const fn as_slog(self) -> slog::Level {
        match self {
            Self::Trace => slog::Level::Trace,
            Self::Debug => slog::Level::Debug,
            Self::Info => slog::Level::Info,
            Self::Warn => slog::Level::Warning,
            Self::Error => slog::Level::Error,
            Self::Fatal | Self::Panic | Self::Disabled => slog::Level::Critical,
        }
    }

    /// Most severe level that shares `level` in `slog`.
    pub(crate) const fn from_slog(level: slog::Level) -> Self {
        match level {
            slog::Level::Trace => Self::Trace,
            slog::Level::Debug => Self::Debug,
            slog::Level::Info => Self::Info,
            slog::Level::Warning => Self::Warn,
            slog::Level::Error => Self::Error,
            slog::Level::Critical => Self::Panic,
        }
    }

    /// Severity of a record, preferring the tag over the coarser `slog` level.
    pub(crate) fn of(record: &slog::Record<'_>) -> Self {
        match record.tag().parse() {
            Ok(level) if level != Self::Disabled => level,
            _ => Self::from_slog(record.level()),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ParseLevelError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Returned by `Level::from_str` for an unknown level name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown log level `{input}`")]
pub struct ParseLevelError {
    input: String,
}
