//! Logging for database queries.
//!
//! [`QueryLogger`] gives a query layer the four calls it usually expects
//! (`error`, `warn`, `info`, `trace`) on top of its own [`Logger`]. Query
//! records carry the elapsed time, the SQL text and the affected row count.

use std::{
    error::Error,
    fmt,
    time::{Duration, Instant},
};

use crate::{config::Config, context::Context, logger::Logger};

const SQL_KEY: &str = "sql";
const ROWS_KEY: &str = "rows";

/// Unit of the elapsed-time field, which also names it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationUnit {
    Nanos,
    Micros,
    #[default]
    Millis,
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nanos => "elapsed_ns",
            Self::Micros => "elapsed_us",
            Self::Millis => "elapsed_ms",
            Self::Seconds => "elapsed_s",
            Self::Minutes => "elapsed_min",
            Self::Hours => "elapsed_hr",
        }
    }

    /// `elapsed` expressed in this unit.
    pub fn of(self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        match self {
            Self::Nanos => secs * 1e9,
            Self::Micros => secs * 1e6,
            Self::Millis => secs * 1e3,
            Self::Seconds => secs,
            Self::Minutes => secs / 60.0,
            Self::Hours => secs / 3600.0,
        }
    }
}

/// Query logger with its own engine and no caller lookup.
#[derive(Debug)]
pub struct QueryLogger {
    logger: Logger,
    unit: DurationUnit,
}

impl QueryLogger {
    /// Builds a logger from `config` that writes to standard output.
    ///
    /// `caller_enable` is ignored: query records never carry `file`/`func`.
    pub fn new(config: &Config) -> Self {
        let config = Config {
            caller_enable: false,
            ..config.clone()
        };
        Self::from_logger(Logger::new(&config))
    }

    /// Wraps an already built logger.
    pub fn from_logger(logger: Logger) -> Self {
        Self {
            logger,
            unit: DurationUnit::default(),
        }
    }

    #[must_use]
    pub fn with_duration_unit(mut self, unit: DurationUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn error(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logger.error().with_context(ctx).msg(args);
    }

    pub fn warn(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logger.warn().with_context(ctx).msg(args);
    }

    pub fn info(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.logger.info().with_context(ctx).msg(args);
    }

    /// Logs one finished query that started at `begin`.
    ///
    /// A failed query is logged at `debug` with its error, a successful one at
    /// `trace`. `f` returns the SQL text and the row count; an empty text or a
    /// negative count is left out of the record.
    pub fn trace<F>(&self, ctx: &Context, begin: Instant, f: F, err: Option<&dyn Error>)
    where
        F: FnOnce() -> (String, i64),
    {
        let mut event = match err {
            Some(err) => self.logger.debug().with_error(err),
            None => self.logger.trace(),
        };
        event = event
            .with_context(ctx)
            .with_field(self.unit.key(), self.unit.of(begin.elapsed()));

        let (sql, rows) = f();
        if !sql.is_empty() {
            event = event.with_field(SQL_KEY, sql);
        }
        if rows > -1 {
            event = event.with_field(ROWS_KEY, rows);
        }
        event.send();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::DurationUnit;

    #[test]
    fn keys_follow_unit() {
        assert_eq!(DurationUnit::default().key(), "elapsed_ms");
        assert_eq!(DurationUnit::Nanos.key(), "elapsed_ns");
        assert_eq!(DurationUnit::Hours.key(), "elapsed_hr");
    }

    #[test]
    fn values_are_fractional() {
        let elapsed = Duration::from_micros(1500);
        assert!((DurationUnit::Millis.of(elapsed) - 1.5).abs() < 1e-9);
        assert!((DurationUnit::Micros.of(elapsed) - 1500.0).abs() < 1e-6);
        assert!((DurationUnit::Minutes.of(Duration::from_secs(90)) - 1.5).abs() < 1e-9);
    }
}
