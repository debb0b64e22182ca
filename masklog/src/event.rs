//! The per-call record builder returned by the level entry points.

use std::{fmt, process};

use serde::Serialize;
use serde_json::Map;

use crate::{
    context::Context,
    hook::{Entry, ERROR_KEY},
    level::Level,
    logger::Logger,
    redaction::{to_fields, to_value},
};

/// A record being built at a fixed level.
///
/// Payload fields are masked as they are attached, so the entry never holds an
/// unmasked sensitive value. Nothing is written until [`msg`](Self::msg) or
/// [`send`](Self::send); dropping an `Event` discards it.
#[must_use = "an event is only written by `msg` or `send`"]
pub struct Event<'a> {
    logger: &'a Logger,
    level: Level,
    entry: Entry,
}

impl<'a> Event<'a> {
    pub(crate) fn new(logger: &'a Logger, level: Level) -> Self {
        Self {
            logger,
            level,
            entry: Entry::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Attaches `value` under `key`.
    ///
    /// The single-entry map `{key: value}` goes through masking, so a sensitive
    /// `key` hides the whole value and sensitive keys nested inside it are masked.
    pub fn with_field<V>(mut self, key: impl Into<String>, value: V) -> Self
    where
        V: Serialize,
    {
        let mut fields = Map::with_capacity(1);
        fields.insert(key.into(), to_value(&value));
        self.entry.extend(self.logger.mask_fields(fields));
        self
    }

    /// Attaches every entry of `fields`, which should serialize to a map.
    ///
    /// A value that does not serialize to a map attaches nothing.
    pub fn with_fields<T>(mut self, fields: T) -> Self
    where
        T: Serialize,
    {
        let fields = to_fields(&fields);
        self.entry.extend(self.logger.mask_fields(fields));
        self
    }

    /// Attaches the error's display text under `error`. Never masked.
    pub fn with_error<E>(mut self, err: &E) -> Self
    where
        E: fmt::Display + ?Sized,
    {
        self.entry.insert(ERROR_KEY, err.to_string());
        self
    }

    /// Binds `context` so the hooks can read its ids and caller-skip override.
    pub fn with_context(mut self, context: &Context) -> Self {
        self.entry.bind(context.clone());
        self
    }

    /// Writes the record with `message`.
    ///
    /// # Panics
    ///
    /// At [`Level::Panic`], panics with `message` once the record is written.
    /// At [`Level::Fatal`] the process exits with status 1 instead.
    pub fn msg(self, message: impl fmt::Display) {
        let Self {
            logger,
            level,
            entry,
        } = self;
        let message = message.to_string();
        if !logger.emit(level, entry, &message) {
            return;
        }
        match level {
            Level::Fatal => process::exit(1),
            Level::Panic => panic!("{message}"),
            _ => {}
        }
    }

    /// Writes the record with an empty message.
    pub fn send(self) {
        self.msg("");
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("level", &self.level)
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}
