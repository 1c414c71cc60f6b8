//! # Validation Adapter — Public Entry Point
//!
//! [`ValidationAdapter`] bundles the configuration and format registry and
//! exposes the validate operations. Documents and schemas may be given as
//! JSON text or as already-decoded [`Value`]s.
//!
//! ## Outcomes
//!
//! - A document that breaks its schema is `Ok(ValidationResult)` with
//!   `is_valid() == false`. That is a normal outcome, not an error.
//! - Malformed JSON text, a malformed schema, a dangling `$ref`, an unknown
//!   format name or an exceeded depth limit are `Err`.
//!
//! ## Reuse
//!
//! Parsing a schema has a cost. Callers validating many documents against
//! one schema should parse it once with [`Structure::parse`] and call
//! [`ValidationAdapter::validate_structure`]. The adapter itself holds no
//! per-call state and is safe to share across threads.

use std::borrow::Cow;

use jsonstruct_core::{SchemaError, StructureError, ValidatorConfig};
use serde_json::Value;

use crate::evaluate::Evaluator;
use crate::format::{FormatChecker, FormatRegistry};
use crate::message::describe_location;
use crate::result::ValidationResult;
use crate::structure::Structure;

/// JSON given either as text or as a decoded value.
#[derive(Debug, Clone, Copy)]
pub enum JsonInput<'a> {
    /// Raw JSON text, decoded on use.
    Text(&'a str),
    /// An already-decoded value.
    Value(&'a Value),
}

impl<'a> JsonInput<'a> {
    /// Decode into a value, borrowing when already decoded.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed text.
    pub fn decode(self) -> Result<Cow<'a, Value>, serde_json::Error> {
        match self {
            Self::Text(text) => serde_json::from_str(text).map(Cow::Owned),
            Self::Value(value) => Ok(Cow::Borrowed(value)),
        }
    }
}

impl<'a> From<&'a str> for JsonInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for JsonInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<&'a Value> for JsonInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// Validates JSON documents against JSON structures.
#[derive(Debug, Clone, Default)]
pub struct ValidationAdapter {
    config: ValidatorConfig,
    formats: FormatRegistry,
}

impl ValidationAdapter {
    /// Default limits and the built-in formats.
    pub fn create_default() -> Self {
        Self::default()
    }

    /// An adapter with explicit limits and formats.
    pub fn new(config: ValidatorConfig, formats: FormatRegistry) -> Self {
        Self { config, formats }
    }

    /// Limits read from the environment, built-in formats.
    ///
    /// # Errors
    ///
    /// Returns `StructureError::Config` if an override is malformed.
    pub fn from_env() -> Result<Self, StructureError> {
        Ok(Self::new(ValidatorConfig::from_env()?, FormatRegistry::default()))
    }

    /// Register an additional format checker.
    pub fn with_format(mut self, name: impl Into<String>, checker: impl FormatChecker + 'static) -> Self {
        self.formats.register(name, checker);
        self
    }

    /// The configured limits.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The registered format checkers.
    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Validate a document against a decoded schema.
    ///
    /// # Errors
    ///
    /// See the module documentation: malformed input or schema problems.
    pub fn validate<'a>(
        &self,
        document: impl Into<JsonInput<'a>>,
        schema: &Value,
    ) -> Result<ValidationResult, StructureError> {
        let structure = Structure::parse_with_limit(schema, self.config.max_depth)?;
        let document = document.into().decode()?;
        Ok(self.validate_structure(&document, &structure)?)
    }

    /// Validate where both the document and the schema may be JSON text.
    ///
    /// # Errors
    ///
    /// See the module documentation: malformed input or schema problems.
    pub fn validate_by_json_structure<'a, 'b>(
        &self,
        document: impl Into<JsonInput<'a>>,
        schema: impl Into<JsonInput<'b>>,
    ) -> Result<ValidationResult, StructureError> {
        let schema = schema.into().decode()?;
        self.validate(document, &schema)
    }

    /// Validate a decoded document against a parsed structure.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for problems found while evaluating, such
    /// as an unknown format or an exceeded depth limit.
    pub fn validate_structure(&self, document: &Value, structure: &Structure) -> Result<ValidationResult, SchemaError> {
        let outcome = Evaluator::new(structure, &self.formats, &self.config).evaluate_document(document)?;
        let Some(violation) = outcome else {
            return Ok(ValidationResult::success());
        };
        let location = describe_location(&violation.path);
        let result = ValidationResult::failure(violation);
        tracing::debug!(
            instance = %location,
            message = result.error_message(),
            "document failed validation"
        );
        Ok(result)
    }
}
