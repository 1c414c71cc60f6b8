//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout jsonstruct. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A document that fails its schema is NOT an error. It is reported through
//!   a validation result carrying a single human-readable message.
//! - Errors here describe a broken call: a malformed schema, an unresolvable
//!   `$ref`, undecodable JSON text, or an invalid configuration.
//! - Schema errors carry a JSON Pointer into the schema document whenever the
//!   offending keyword can be located.

use thiserror::Error;

/// Top-level error type for jsonstruct.
#[derive(Error, Debug)]
pub enum StructureError {
    /// The schema document is malformed or cannot be evaluated.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// JSON text handed to the validator could not be decoded.
    #[error("json decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Validator configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A schema authoring error.
///
/// These indicate the schema itself is broken, not that a document failed
/// validation against it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A keyword has the wrong shape (e.g. `required` is not an array).
    #[error("invalid keyword at '{pointer}': {reason}")]
    InvalidKeyword {
        /// JSON Pointer to the keyword within the schema document.
        pointer: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The `type` keyword names a type that does not exist.
    #[error("unknown type '{name}' at '{pointer}'")]
    UnknownType {
        /// The unrecognised type name.
        name: String,
        /// JSON Pointer to the `type` keyword.
        pointer: String,
    },

    /// A `$ref` that is not of the form `#/definitions/<name>`.
    #[error("unsupported reference '{0}', expected '#/definitions/<name>'")]
    UnsupportedReference(String),

    /// A `$ref` naming a definition that does not exist.
    #[error("unresolved reference '{0}'")]
    UnresolvedReference(String),

    /// A chain of definitions that refer to each other without end, or that
    /// is longer than the configured limit.
    #[error("reference chain starting at '{0}' is cyclic or too long")]
    ReferenceCycle(String),

    /// The `format` keyword names a checker that is not registered.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    /// A `required` entry that is not declared in `properties`.
    #[error("required field '{field}' at '{pointer}' is not declared in properties")]
    RequiredNotDeclared {
        /// The undeclared field name.
        field: String,
        /// JSON Pointer to the `required` keyword.
        pointer: String,
    },

    /// Evaluation nested deeper than the configured limit.
    #[error("evaluation exceeded the maximum depth of {limit}")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// Error loading validator configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An override is not a positive integer.
    #[error("invalid value '{value}' for {var}: expected a positive integer")]
    InvalidValue {
        /// The environment variable name.
        var: String,
        /// The raw value found.
        value: String,
    },
}
