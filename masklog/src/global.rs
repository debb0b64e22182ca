//! The process-wide logger and the free functions that log through it.

use std::sync::OnceLock;

use crate::{config::Config, event::Event, logger::Logger, logger::LoggerBuilder};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Builds the process-wide logger from `config`.
///
/// Only the first initialization takes effect. Later calls, and calls after
/// [`logger`] has already built the default, return the existing instance and
/// leave it unchanged.
pub fn init(config: &Config) -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(config))
}

/// Like [`init`], with the overrides of a [`LoggerBuilder`].
pub fn init_with(builder: LoggerBuilder) -> &'static Logger {
    LOGGER.get_or_init(|| builder.build())
}

/// Returns the process-wide logger, building the default one if [`init`] was
/// never called.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(&Config::default()))
}

pub fn trace() -> Event<'static> {
    logger().trace()
}

pub fn debug() -> Event<'static> {
    logger().debug()
}

pub fn info() -> Event<'static> {
    logger().info()
}

pub fn warn() -> Event<'static> {
    logger().warn()
}

pub fn error() -> Event<'static> {
    logger().error()
}

/// See [`Logger::fatal`].
pub fn fatal() -> Event<'static> {
    logger().fatal()
}

/// See [`Logger::panic`].
pub fn panic() -> Event<'static> {
    logger().panic()
}
