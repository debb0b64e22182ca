//! Recursive masking over keyed collections.
//!
//! Masking is structure-preserving: the output has the same shape and the same
//! keys as the input, and only values stored under sensitive keys change. A
//! sensitive key hides everything below it, so nested content is never visited.
//!
//! Sequences are walked one level: elements that are keyed collections are
//! masked, every other element (scalars, nested sequences) passes through.

use serde_json::{Map, Value};

use crate::classification::Classifier;

/// Placeholder substituted for every sensitive value, whatever its original type.
pub const REDACTED_MARKER: &str = "***";

/// Masks every field of `fields` whose key the classifier marks as sensitive.
///
/// The input is consumed and a new map is returned, so callers that keep the
/// original must clone it first. Masking an already-masked map is a no-op.
///
/// ```rust
/// use masklog::{mask_fields, Classifier};
/// use serde_json::json;
///
/// let classifier = Classifier::new();
/// let fields = json!({ "user": { "password": "hunter2", "id": 7 } });
/// let masked = mask_fields(&classifier, fields.as_object().cloned().unwrap());
///
/// assert_eq!(masked["user"]["password"], "***");
/// assert_eq!(masked["user"]["id"], 7);
/// ```
#[must_use]
pub fn mask_fields(classifier: &Classifier, fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| {
            let value = if classifier.is_sensitive(&key) {
                Value::String(REDACTED_MARKER.to_owned())
            } else {
                mask_value(classifier, value)
            };
            (key, value)
        })
        .collect()
}

/// Masks the keyed collections reachable from `value`.
///
/// Scalars are returned unchanged: a value on its own has no key to classify.
#[must_use]
pub fn mask_value(classifier: &Classifier, value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(mask_fields(classifier, fields)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(fields) => Value::Object(mask_fields(classifier, fields)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}
