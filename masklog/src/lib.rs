//! Structured logging with sensitive-field masking and request-context enrichment.
//!
//! This crate sits on top of `slog` and adds two behaviors to every record:
//! - **Masking**: payload fields whose key is classified as sensitive are
//!   replaced with [`REDACTED_MARKER`], at any nesting depth.
//! - **Enrichment**: hooks run right before a record is handed to the engine
//!   and append the application name, correlation identifiers from a bound
//!   [`Context`], and the caller's `file`/`func`.
//!
//! Key rules:
//! - Field names are matched case-insensitively against the [`Classifier`].
//! - A sensitive key hides its whole value, including nested collections.
//! - Sequences are walked element by element; only keyed elements are masked.
//! - Errors attached with [`Event::with_error`] are never masked.
//! - `func` is resolved from symbol names in any build. `file:line` needs line
//!   tables, so release profiles should set `debug = "line-tables-only"` or
//!   higher; without them `file` is [`UNKNOWN_LOCATION`].
//! - Nothing on the logging path returns an error or panics, except the
//!   `fatal` and `panic` levels, which terminate after the record is written.
//!
//! ```no_run
//! use masklog::{Config, Context, MaskingConfig};
//! use serde_json::json;
//!
//! masklog::init(&Config {
//!     app_name: "billing".into(),
//!     level: "info".into(),
//!     masking: MaskingConfig {
//!         enabled: true,
//!         sensitive_fields: vec!["lastName".into()],
//!     },
//!     caller_enable: true,
//! });
//!
//! let ctx = Context::new().with_trace_id("trace-id-value");
//! masklog::info()
//!     .with_fields(json!({ "data": { "password": "P@ssw0rd", "lastName": "Doe" } }))
//!     .with_context(&ctx)
//!     .msg("payment accepted");
//! ```
//!
//! What it does not do:
//! - encrypt redacted values (masking is irreversible replacement)
//! - fan records out to more than one sink

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
pub mod caller;
mod classification;
mod config;
mod context;
mod event;
mod global;
mod hook;
mod level;
mod logger;
pub mod query;
mod redaction;
pub mod slog;

// Re-exports
pub use caller::{Caller, CallerResolver, NoCaller, UNKNOWN_LOCATION};
#[cfg(feature = "caller")]
pub use caller::StackResolver;
pub use classification::{Classifier, DEFAULT_SENSITIVE_FIELDS};
pub use config::{Config, MaskingConfig};
pub use context::Context;
pub use event::Event;
pub use global::{debug, error, fatal, info, init, init_with, logger, panic, trace, warn};
pub use hook::{Enrichment, Entry, Hook, APP_NAME_KEY, ERROR_KEY};
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, LoggerBuilder};
pub use query::{DurationUnit, QueryLogger};
pub use redaction::{mask_fields, mask_value, to_fields, to_value, REDACTED_MARKER};
