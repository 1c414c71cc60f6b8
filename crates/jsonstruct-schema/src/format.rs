//! # Format Checkers — Named String Predicates
//!
//! The `format` keyword names a checker in a [`FormatRegistry`]. The
//! evaluator only asks the registry "does this string pass format X?"; new
//! formats are added by registering a [`FormatChecker`], never by touching
//! the evaluator.
//!
//! ## Default Formats
//!
//! | Name                | Accepts                                      |
//! |---------------------|----------------------------------------------|
//! | `param_alpha`       | ASCII letters                                |
//! | `param_alphaext`    | ASCII letters, `_` and `-`                   |
//! | `param_alphanum`    | ASCII letters and digits                     |
//! | `param_alphanumext` | ASCII letters, digits, `_` and `-`           |
//! | `param_int`         | a canonical decimal integer (`0`, `-12`)     |
//! | `param_sequence`    | digits and commas                            |
//! | `param_email`       | `local@domain.tld` without whitespace        |
//!
//! The character-class formats accept the empty string.

use std::collections::HashMap;
use std::sync::Arc;

use jsonstruct_core::SchemaError;

/// ASCII letters.
pub const PARAM_ALPHA: &str = "param_alpha";
/// ASCII letters, `_` and `-`.
pub const PARAM_ALPHAEXT: &str = "param_alphaext";
/// ASCII letters and digits.
pub const PARAM_ALPHANUM: &str = "param_alphanum";
/// ASCII letters, digits, `_` and `-`.
pub const PARAM_ALPHANUMEXT: &str = "param_alphanumext";
/// A canonical decimal integer.
pub const PARAM_INT: &str = "param_int";
/// Digits and commas.
pub const PARAM_SEQUENCE: &str = "param_sequence";
/// An email address.
pub const PARAM_EMAIL: &str = "param_email";

/// A predicate over string values.
pub trait FormatChecker: Send + Sync {
    /// Whether `value` conforms to the format.
    fn check(&self, value: &str) -> bool;
}

impl<F> FormatChecker for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn check(&self, value: &str) -> bool {
        self(value)
    }
}

/// Name-to-checker table consulted by the `format` keyword.
#[derive(Clone)]
pub struct FormatRegistry {
    checkers: HashMap<String, Arc<dyn FormatChecker>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FormatRegistry {
    /// An empty registry. Every `format` keyword fails with
    /// `SchemaError::UnknownFormat` until checkers are registered.
    pub fn new() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// A registry holding the built-in `param_*` formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PARAM_ALPHA, |v: &str| all_chars(v, |c| c.is_ascii_alphabetic()));
        registry.register(PARAM_ALPHAEXT, |v: &str| {
            all_chars(v, |c| c.is_ascii_alphabetic() || c == '_' || c == '-')
        });
        registry.register(PARAM_ALPHANUM, |v: &str| all_chars(v, |c| c.is_ascii_alphanumeric()));
        registry.register(PARAM_ALPHANUMEXT, |v: &str| {
            all_chars(v, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
        registry.register(PARAM_INT, is_canonical_integer);
        registry.register(PARAM_SEQUENCE, |v: &str| all_chars(v, |c| c.is_ascii_digit() || c == ','));
        registry.register(PARAM_EMAIL, is_email);
        registry
    }

    /// Register (or replace) a checker under `name`.
    pub fn register(&mut self, name: impl Into<String>, checker: impl FormatChecker + 'static) {
        self.checkers.insert(name.into(), Arc::new(checker));
    }

    /// Whether a checker is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.checkers.contains_key(name)
    }

    /// Registered format names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run the checker registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownFormat` if nothing is registered under
    /// `name`.
    pub fn check(&self, name: &str, value: &str) -> Result<bool, SchemaError> {
        self.checkers
            .get(name)
            .map(|checker| checker.check(value))
            .ok_or_else(|| SchemaError::UnknownFormat(name.to_string()))
    }
}

fn all_chars(value: &str, allowed: impl Fn(char) -> bool) -> bool {
    value.chars().all(allowed)
}

/// `0`, or an optional minus sign followed by digits without a leading zero.
fn is_canonical_integer(value: &str) -> bool {
    if value == "0" {
        return true;
    }
    let digits = value.strip_prefix('-').unwrap_or(value);
    match digits.as_bytes() {
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
        [] => false,
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
