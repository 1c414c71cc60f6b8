//! # Validation Result
//!
//! The outcome returned to callers: a validity flag and, for a failure, the
//! rendered message plus the structured [`Violation`] it came from. The
//! message is rendered once, when the result is built.

use serde::Serialize;

use crate::message::render_violation;
use crate::violation::Violation;

/// Outcome of validating one document.
///
/// A valid result always carries an empty message; an invalid one always
/// carries a non-empty message and its violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<Violation>,
}

impl ValidationResult {
    /// The document conforms.
    pub fn success() -> Self {
        Self {
            valid: true,
            error_message: String::new(),
            violation: None,
        }
    }

    /// The document failed with `violation`.
    pub fn failure(violation: Violation) -> Self {
        Self {
            valid: false,
            error_message: render_violation(&violation),
            violation: Some(violation),
        }
    }

    /// Whether the document conforms.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The failure message, or `""` for a valid document.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// The first violated constraint, if any.
    pub fn violation(&self) -> Option<&Violation> {
        self.violation.as_ref()
    }

    /// JSON Pointer to the offending value, if any.
    pub fn instance_path(&self) -> Option<String> {
        self.violation.as_ref().map(|v| v.path.to_pointer())
    }
}
