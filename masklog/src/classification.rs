//! The set of field names that are considered sensitive.
//!
//! Names are stored lower-cased, so membership is case-insensitive: `Password`,
//! `PASSWORD` and `password` all match the same entry. The set only grows; there
//! is no way to remove a name once it has been seeded.

use std::collections::HashSet;

/// Field names that are masked out of the box.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "name",
    "firstname",
    "lastname",
    "cardno",
    "passport",
    "passportid",
    "passportno",
    "nationalid",
    "cid",
    "citizen_id",
    "cvc",
    "cvv",
    "password",
    "x-api-key",
    "authorization",
    "x-authorization",
];

/// Case-insensitive classifier for sensitive field names.
///
/// A `Classifier` is built once, seeded with [`DEFAULT_SENSITIVE_FIELDS`] plus any
/// configured names, and then only read. It is cheap to share behind a reference
/// across threads.
///
/// ```rust
/// use masklog::Classifier;
///
/// let mut classifier = Classifier::new();
/// classifier.seed(["lastName"]);
///
/// assert!(classifier.is_sensitive("LASTNAME"));
/// assert!(classifier.is_sensitive("Password"));
/// assert!(!classifier.is_sensitive("username"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    fields: HashSet<String>,
}

impl Classifier {
    /// Creates a classifier seeded with [`DEFAULT_SENSITIVE_FIELDS`].
    #[must_use]
    pub fn new() -> Self {
        let mut classifier = Self::empty();
        classifier.seed(DEFAULT_SENSITIVE_FIELDS);
        classifier
    }

    /// Creates a classifier that matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fields: HashSet::new(),
        }
    }

    /// Adds names to the set.
    ///
    /// Names are lower-cased before insertion. Seeding the same name twice, or
    /// in a different order, leaves the set unchanged.
    pub fn seed<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fields
            .extend(names.into_iter().map(|name| name.as_ref().to_lowercase()));
    }

    /// Builder-style variant of [`Classifier::seed`].
    #[must_use]
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.seed(names);
        self
    }

    /// Returns `true` if `name` is a sensitive field name, ignoring case.
    pub fn is_sensitive(&self, name: &str) -> bool {
        if name.chars().any(char::is_uppercase) {
            self.fields.contains(&name.to_lowercase())
        } else {
            self.fields.contains(name)
        }
    }

    /// Number of distinct names in the set.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the lower-cased names, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Classifier, DEFAULT_SENSITIVE_FIELDS};

    #[test]
    fn defaults_are_sensitive() {
        let classifier = Classifier::new();
        for name in DEFAULT_SENSITIVE_FIELDS {
            assert!(classifier.is_sensitive(name), "{name} should be sensitive");
        }
        assert!(!classifier.is_sensitive("credit_card"));
        assert!(!classifier.is_sensitive("mobile_number"));
    }

    #[test]
    fn matching_ignores_case() {
        let classifier = Classifier::new();
        assert!(classifier.is_sensitive("Password"));
        assert!(classifier.is_sensitive("PASSWORD"));
        assert!(classifier.is_sensitive("password"));
        assert!(classifier.is_sensitive("X-Api-Key"));
    }

    #[test]
    fn seeded_names_are_lower_cased() {
        let classifier = Classifier::empty().with_fields(["lastName", "CC_Number"]);
        assert!(classifier.iter().all(|name| name == name.to_lowercase()));
        assert!(classifier.is_sensitive("lastname"));
        assert!(classifier.is_sensitive("cc_number"));
    }

    #[test]
    fn seeding_is_idempotent_and_order_independent() {
        let mut first = Classifier::empty();
        first.seed(["a", "B", "c"]);
        first.seed(["c", "A"]);

        let second = Classifier::empty().with_fields(["C", "b", "a"]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn empty_classifier_matches_nothing() {
        let classifier = Classifier::empty();
        assert!(classifier.is_empty());
        assert!(!classifier.is_sensitive("password"));
    }
}
