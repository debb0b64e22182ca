//! The configured logger and its builder.
//!
//! A [`Logger`] masks payloads with its classifier, runs its hooks and writes
//! through a `slog` engine made of [`JsonDrain`] behind a [`SeverityFilter`].

use std::{
    fmt,
    io::{self, Write},
};

use serde_json::{Map, Value};
use slog::{o, BorrowedKV, Drain, Record, RecordLocation, RecordStatic};

use crate::{
    caller::{default_resolver, CallerResolver},
    classification::Classifier,
    config::Config,
    event::Event,
    hook::{Enrichment, Entry, Hook},
    level::Level,
    redaction::mask_fields,
    slog::{FieldsKv, JsonDrain, SeverityFilter},
};

static LOCATION: RecordLocation = RecordLocation {
    file: file!(),
    line: line!(),
    column: column!(),
    function: "",
    module: module_path!(),
};

/// A configured logger: the `slog` engine plus the classifier, the masking
/// switch and the hooks every record runs through.
///
/// Most applications use the process-wide instance from [`init`](crate::init)
/// or [`logger`](crate::logger). A `Logger` can also be built directly and
/// passed by reference, which is what tests and libraries usually want.
pub struct Logger {
    engine: slog::Logger,
    classifier: Classifier,
    masking: bool,
    level: Level,
    hooks: Vec<Box<dyn Hook>>,
}

impl Logger {
    /// Builds a logger that writes to standard output.
    pub fn new(config: &Config) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: &Config) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    /// Minimum level a record needs to be written.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn masking_enabled(&self) -> bool {
        self.masking
    }

    /// Returns `true` if a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Disabled && level >= self.level
    }

    /// Masks `fields` with this logger's classifier.
    ///
    /// When masking is disabled the fields are returned untouched; the
    /// classifier is not consulted at all.
    pub fn mask_fields(&self, fields: Map<String, Value>) -> Map<String, Value> {
        if self.masking {
            mask_fields(&self.classifier, fields)
        } else {
            fields
        }
    }

    pub fn trace(&self) -> Event<'_> {
        Event::new(self, Level::Trace)
    }

    pub fn debug(&self) -> Event<'_> {
        Event::new(self, Level::Debug)
    }

    pub fn info(&self) -> Event<'_> {
        Event::new(self, Level::Info)
    }

    pub fn warn(&self) -> Event<'_> {
        Event::new(self, Level::Warn)
    }

    pub fn error(&self) -> Event<'_> {
        Event::new(self, Level::Error)
    }

    /// The process exits with status 1 once the record is written.
    pub fn fatal(&self) -> Event<'_> {
        Event::new(self, Level::Fatal)
    }

    /// The calling thread panics with the message once the record is written.
    pub fn panic(&self) -> Event<'_> {
        Event::new(self, Level::Panic)
    }

    /// Runs the hooks and hands the record to the engine.
    ///
    /// Returns `false` if the record was filtered out by level.
    pub(crate) fn emit(&self, level: Level, mut entry: Entry, message: &str) -> bool {
        if !self.enabled(level) {
            return false;
        }
        for hook in &self.hooks {
            hook.run(&mut entry, level, message);
        }

        let record_static = RecordStatic {
            location: &LOCATION,
            level: level.as_slog(),
            tag: level.as_str(),
        };
        let fields = FieldsKv(entry.fields());
        self.engine.log(&Record::new(
            &record_static,
            &format_args!("{message}"),
            BorrowedKV(&fields),
        ));
        true
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("masking", &self.masking)
            .field("sensitive_fields", &self.classifier.len())
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

/// Builds a [`Logger`] from a [`Config`], with optional overrides.
///
/// ```rust
/// use masklog::{Config, Logger, NoCaller};
///
/// let logger = Logger::builder(&Config::default())
///     .writer(std::io::sink())
///     .caller_resolver(NoCaller)
///     .hook(|entry: &mut masklog::Entry, _: masklog::Level, _: &str| {
///         entry.insert("region", "eu-west-1");
///     })
///     .build();
///
/// logger.info().with_field("attempt", 2).msg("retrying");
/// ```
pub struct LoggerBuilder {
    config: Config,
    writer: Option<Box<dyn Write + Send>>,
    resolver: Option<Box<dyn CallerResolver>>,
    caller_skip: usize,
    hooks: Vec<Box<dyn Hook>>,
}

impl LoggerBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            writer: None,
            resolver: None,
            caller_skip: 0,
            hooks: Vec::new(),
        }
    }

    /// Writes records to `writer` instead of standard output.
    #[must_use]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Replaces the default caller resolver. Ignored when caller info is off.
    #[must_use]
    pub fn caller_resolver<R>(mut self, resolver: R) -> Self
    where
        R: CallerResolver + 'static,
    {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Default number of application frames to skip when locating the caller.
    #[must_use]
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = skip;
        self
    }

    /// Registers a hook that runs after the built-in enrichment.
    #[must_use]
    pub fn hook<H>(mut self, hook: H) -> Self
    where
        H: Hook + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn build(self) -> Logger {
        let Self {
            config,
            writer,
            resolver,
            caller_skip,
            hooks,
        } = self;

        let level = config.parsed_level();
        let mut classifier = Classifier::new();
        classifier.seed(&config.masking.sensitive_fields);

        let writer = writer.unwrap_or_else(|| Box::new(io::stdout()));
        let drain = SeverityFilter::new(JsonDrain::new(writer), level).ignore_res();
        let engine = slog::Logger::root(drain, o!());

        let mut enrichment = Enrichment::new(config.app_name);
        if config.caller_enable {
            let resolver = resolver.unwrap_or_else(default_resolver);
            enrichment = enrichment.with_caller(resolver, caller_skip);
        }
        let mut all_hooks: Vec<Box<dyn Hook>> = Vec::with_capacity(hooks.len() + 1);
        all_hooks.push(Box::new(enrichment));
        all_hooks.extend(hooks);

        Logger {
            engine,
            classifier,
            masking: config.masking.enabled,
            level,
            hooks: all_hooks,
        }
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("caller_skip", &self.caller_skip)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}
