//! Caller lookup for the `file` and `func` record fields.
//!
//! Resolution sits behind [`CallerResolver`] so it can be swapped out: the
//! default [`StackResolver`] walks the live stack with the `backtrace` crate
//! (behind the `caller` feature), while [`NoCaller`] never resolves and makes
//! the enrichment hook fall back to [`UNKNOWN_LOCATION`].
//!
//! Frame counting starts at the first frame outside the logging machinery
//! (this crate, `slog`, `backtrace` and the standard library), so a skip of `0`
//! is the function that built the record, whatever the inlining in between.
//!
//! Function names come from the symbol table and are available in any build.
//! `file:line` needs line tables: release profiles must set at least
//! `debug = "line-tables-only"`, otherwise `file` carries [`UNKNOWN_LOCATION`]
//! while `func` is still reported.

use std::path::Path;

/// Placeholder written to `file` when no location could be resolved.
pub const UNKNOWN_LOCATION: &str = "<???>:1";

/// A resolved call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    /// Base name of the source file, when the binary carries line tables.
    pub file: Option<String>,
    pub line: Option<u32>,
    /// Bare function name, without its module path.
    pub function: String,
}

impl Caller {
    /// `file:line`, as written to the `file` field, or [`UNKNOWN_LOCATION`]
    /// when either half is missing.
    pub fn location(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            _ => UNKNOWN_LOCATION.to_owned(),
        }
    }
}

/// Looks up the call site `skip` application frames above the logging call.
pub trait CallerResolver: Send + Sync {
    /// Returns `None` when the frame does not exist or has no symbol name.
    fn resolve(&self, skip: usize) -> Option<Caller>;
}

/// Resolver that never finds a frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCaller;

impl CallerResolver for NoCaller {
    fn resolve(&self, _skip: usize) -> Option<Caller> {
        None
    }
}

/// Resolver backed by a live stack walk.
#[cfg(feature = "caller")]
#[derive(Clone, Copy, Debug, Default)]
pub struct StackResolver;

#[cfg(feature = "caller")]
impl CallerResolver for StackResolver {
    fn resolve(&self, skip: usize) -> Option<Caller> {
        let mut entered = false;
        let mut remaining = skip;
        let mut done = false;
        let mut caller = None;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if done {
                    return;
                }
                let Some(name) = symbol.name() else {
                    return;
                };
                // `{:#}` drops the trailing hash.
                let name = format!("{name:#}");
                if is_own_frame(&name) {
                    entered = true;
                    return;
                }
                // Frames below the first logging frame belong to the unwinder.
                if !entered || is_runtime_frame(&name) {
                    return;
                }
                if remaining > 0 {
                    remaining -= 1;
                    return;
                }
                done = true;
                caller = Some(caller_from(&name, symbol.filename(), symbol.lineno()));
            });
            !done
        });

        caller
    }
}

/// Returns the default resolver for the enabled feature set.
pub fn default_resolver() -> Box<dyn CallerResolver> {
    #[cfg(feature = "caller")]
    {
        Box::new(StackResolver)
    }
    #[cfg(not(feature = "caller"))]
    {
        Box::new(NoCaller)
    }
}

/// Builds a [`Caller`] from a resolved symbol. Missing line tables only cost
/// the location.
#[cfg_attr(not(feature = "caller"), allow(dead_code))]
fn caller_from(symbol: &str, path: Option<&Path>, line: Option<u32>) -> Caller {
    let file = path
        .and_then(Path::file_name)
        .map(|file| file.to_string_lossy().into_owned());
    Caller {
        file,
        line,
        function: function_name(symbol).to_owned(),
    }
}

#[cfg_attr(not(feature = "caller"), allow(dead_code))]
const OWN_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

#[cfg_attr(not(feature = "caller"), allow(dead_code))]
const RUNTIME_PREFIXES: &[&str] = &["std::", "core::", "alloc::", "slog::", "backtrace::"];

#[cfg_attr(not(feature = "caller"), allow(dead_code))]
fn is_own_frame(symbol: &str) -> bool {
    symbol.trim_start_matches('<').starts_with(OWN_PREFIX)
}

#[cfg_attr(not(feature = "caller"), allow(dead_code))]
fn is_runtime_frame(symbol: &str) -> bool {
    let symbol = symbol.trim_start_matches('<');
    RUNTIME_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}

/// Last path segment that names a function, skipping closures and generics.
#[cfg_attr(not(feature = "caller"), allow(dead_code))]
fn function_name(symbol: &str) -> &str {
    symbol
        .rsplit("::")
        .find(|segment| {
            !segment.is_empty() && !segment.starts_with("{{") && !segment.starts_with('<')
        })
        .unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{
        caller_from, function_name, is_own_frame, is_runtime_frame, Caller, CallerResolver,
        NoCaller, UNKNOWN_LOCATION,
    };

    #[test]
    fn function_name_strips_module_path() {
        assert_eq!(function_name("billing::handlers::create_invoice"), "create_invoice");
        assert_eq!(function_name("main"), "main");
    }

    #[test]
    fn function_name_skips_closures_and_generics() {
        assert_eq!(
            function_name("billing::handlers::create_invoice::{{closure}}"),
            "create_invoice"
        );
        assert_eq!(function_name("billing::parse::<u32>"), "parse");
        assert_eq!(
            function_name("<billing::Invoice as billing::Render>::render"),
            "render"
        );
    }

    #[test]
    fn classifies_frames() {
        assert!(is_own_frame("masklog::event::Event::msg"));
        assert!(is_own_frame("<masklog::hook::Enrichment as masklog::hook::Hook>::run"));
        assert!(!is_own_frame("billing::main"));
        assert!(is_runtime_frame("core::ops::function::FnOnce::call_once"));
        assert!(is_runtime_frame("<alloc::boxed::Box<F> as core::ops::function::Fn<A>>::call"));
        assert!(!is_runtime_frame("billing::main"));
    }

    #[test]
    fn location_joins_file_and_line() {
        let caller = Caller {
            file: Some("main.rs".into()),
            line: Some(42),
            function: "main".into(),
        };
        assert_eq!(caller.location(), "main.rs:42");
    }

    #[test]
    fn caller_from_keeps_path_basename() {
        let caller = caller_from(
            "billing::handlers::create_invoice",
            Some(Path::new("/src/billing/src/handlers.rs")),
            Some(17),
        );
        assert_eq!(caller.location(), "handlers.rs:17");
        assert_eq!(caller.function, "create_invoice");
    }

    #[test]
    fn caller_without_line_tables_keeps_function() {
        let caller = caller_from("billing::handlers::create_invoice::{{closure}}", None, None);
        assert_eq!(caller.file, None);
        assert_eq!(caller.location(), UNKNOWN_LOCATION);
        assert_eq!(caller.function, "create_invoice");

        let caller = caller_from("billing::main", Some(Path::new("main.rs")), None);
        assert_eq!(caller.location(), UNKNOWN_LOCATION);
    }

    #[test]
    fn no_caller_never_resolves() {
        assert_eq!(NoCaller.resolve(0), None);
    }

    #[cfg(feature = "caller")]
    #[test]
    fn stack_resolver_reports_unreachable_skip_as_none() {
        use super::StackResolver;

        assert_eq!(StackResolver.resolve(10_000), None);
    }
}
