//! Structural conversion of arbitrary payloads into `serde_json` values.
//!
//! Conversion goes through `Serialize`, so it is lossy in the same way any JSON
//! encoding is: skipped fields, private state without a `Serialize` impl, and
//! custom representations all follow the type's own serde behavior. Failures
//! are never propagated; a value that cannot be converted becomes an empty
//! object.

use serde::Serialize;
use serde_json::{Map, Value};

/// Converts `value` into a `serde_json::Value`.
///
/// Primitives map onto scalar variants directly. Structs and maps become
/// objects, sequences become arrays. If serialization fails the result is an
/// empty object.
pub fn to_value<T>(value: &T) -> Value
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Converts `value` into a keyed collection.
///
/// Anything that does not serialize to an object (scalars, sequences, failed
/// conversions) yields an empty map.
pub fn to_fields<T>(value: &T) -> Map<String, Value>
where
    T: Serialize + ?Sized,
{
    match to_value(value) {
        Value::Object(fields) => fields,
        _ => Map::new(),
    }
}
