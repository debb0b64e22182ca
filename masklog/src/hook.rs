//! Hooks that run right before a record is handed to the engine.
//!
//! A hook sees the in-flight [`Entry`] together with its level and message, and
//! may append fields to it. Hooks run once per emitted record, in registration
//! order, after every payload field has been masked; values they add are not
//! masked. Records filtered out by level never reach the hooks.
//!
//! [`Enrichment`] is always registered first. It adds the application name, the
//! correlation ids of the bound [`Context`], and the caller location.

use serde_json::{Map, Value};

use crate::{
    caller::{CallerResolver, UNKNOWN_LOCATION},
    context::Context,
    level::Level,
};

/// Field carrying [`Config::app_name`](crate::Config::app_name).
pub const APP_NAME_KEY: &str = "appName";
/// Field carrying errors attached with [`Event::with_error`](crate::Event::with_error).
pub const ERROR_KEY: &str = "error";

const TRACE_ID_KEY: &str = "trace_id";
const REQUEST_ID_KEY: &str = "request_id";
const CORRELATION_ID_KEY: &str = "correlation_id";
const FILE_KEY: &str = "file";
const FUNC_KEY: &str = "func";

/// A record under construction: its fields so far and the bound context.
#[derive(Clone, Debug, Default)]
pub struct Entry {
    fields: Map<String, Value>,
    context: Option<Context>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Sets `key`, replacing any earlier value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub(crate) fn extend(&mut self, fields: Map<String, Value>) {
        self.fields.extend(fields);
    }

    pub(crate) fn bind(&mut self, context: Context) {
        self.context = Some(context);
    }
}

/// Runs against every emitted record before it is written.
///
/// Hooks must not fail: anything they cannot compute is left out of the entry.
pub trait Hook: Send + Sync {
    fn run(&self, entry: &mut Entry, level: Level, message: &str);
}

impl<F> Hook for F
where
    F: Fn(&mut Entry, Level, &str) + Send + Sync,
{
    fn run(&self, entry: &mut Entry, level: Level, message: &str) {
        self(entry, level, message);
    }
}

/// Adds `appName`, the context's correlation ids and the caller's `file`/`func`.
pub struct Enrichment {
    app_name: String,
    caller: Option<Box<dyn CallerResolver>>,
    caller_skip: usize,
}

impl Enrichment {
    /// Enrichment without caller lookup.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            caller: None,
            caller_skip: 0,
        }
    }

    /// Looks up `file`/`func` through `resolver`, ascending `skip` frames unless
    /// the bound context overrides it.
    #[must_use]
    pub fn with_caller(mut self, resolver: Box<dyn CallerResolver>, skip: usize) -> Self {
        self.caller = Some(resolver);
        self.caller_skip = skip;
        self
    }

    fn add_caller(&self, entry: &mut Entry, resolver: &dyn CallerResolver) {
        let skip = entry
            .context()
            .and_then(Context::caller_skip)
            .unwrap_or(self.caller_skip);
        match resolver.resolve(skip) {
            Some(caller) => {
                entry.insert(FILE_KEY, caller.location());
                entry.insert(FUNC_KEY, caller.function);
            }
            None => {
                entry.insert(FILE_KEY, UNKNOWN_LOCATION);
                entry.insert(FUNC_KEY, "");
            }
        }
    }
}

impl Hook for Enrichment {
    fn run(&self, entry: &mut Entry, _level: Level, _message: &str) {
        if !self.app_name.is_empty() {
            entry.insert(APP_NAME_KEY, self.app_name.as_str());
        }

        if let Some(context) = entry.context().cloned() {
            let ids = [
                (TRACE_ID_KEY, context.trace_id()),
                (REQUEST_ID_KEY, context.request_id()),
                (CORRELATION_ID_KEY, context.correlation_id()),
            ];
            for (key, id) in ids {
                if let Some(id) = id {
                    entry.insert(key, id);
                }
            }
        }

        if let Some(resolver) = &self.caller {
            self.add_caller(entry, resolver.as_ref());
        }
    }
}

impl std::fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enrichment")
            .field("app_name", &self.app_name)
            .field("caller", &self.caller.is_some())
            .field("caller_skip", &self.caller_skip)
            .finish()
    }
}
