//! Request-scoped correlation data.

use std::num::NonZeroUsize;

/// Request-scoped correlation data bound to a record with
/// [`Event::with_context`](crate::Event::with_context).
///
/// Every slot is optional. Slots are typed fields rather than string keys, so
/// nothing else carried alongside a request can overwrite them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    trace_id: Option<String>,
    request_id: Option<String>,
    correlation_id: Option<String>,
    caller_skip: Option<usize>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Overrides how many application frames the caller lookup ascends.
    ///
    /// `0` reports the first frame outside the logging machinery; wrappers
    /// around the logger pass `1` per wrapping function.
    pub fn with_caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = Some(skip);
        self
    }

    /// Adds `extra` frames on top of the current override, or on top of zero.
    pub fn add_caller_skip(self, extra: NonZeroUsize) -> Self {
        let skip = self.caller_skip.unwrap_or_default().saturating_add(extra.get());
        self.with_caller_skip(skip)
    }

    /// The trace id, if set to a non-empty value.
    pub fn trace_id(&self) -> Option<&str> {
        non_empty(self.trace_id.as_deref())
    }

    pub fn request_id(&self) -> Option<&str> {
        non_empty(self.request_id.as_deref())
    }

    pub fn correlation_id(&self) -> Option<&str> {
        non_empty(self.correlation_id.as_deref())
    }

    pub fn caller_skip(&self) -> Option<usize> {
        self.caller_skip
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
