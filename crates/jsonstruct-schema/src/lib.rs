//! # jsonstruct-schema — Fail-Fast JSON Structure Validation
//!
//! Validates JSON documents against a JSON structure (a JSON Schema
//! dialect) and reports the first violated constraint as a single
//! human-readable sentence.
//!
//! ## Pipeline
//!
//! 1. [`structure`] parses the schema document into a typed tree and
//!    checks every `$ref` against the root `definitions` table.
//! 2. [`evaluate`] walks the document depth-first, resolving references
//!    through [`resolve`] and delegating `format` to the [`format`]
//!    registry. It stops at the first [`Violation`].
//! 3. [`message`] renders that violation, and [`result`] packages it as a
//!    [`ValidationResult`].
//!
//! [`adapter`] ties these together behind [`ValidationAdapter`]:
//!
//! ```
//! use jsonstruct_schema::ValidationAdapter;
//! use serde_json::json;
//!
//! let adapter = ValidationAdapter::create_default();
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"id": {"type": "integer"}},
//!     "required": ["id"]
//! });
//! let result = adapter.validate(r#"{"id": "x"}"#, &schema).unwrap();
//! assert_eq!(
//!     result.error_message(),
//!     "Expect type of field 'id' to be integer, but receive type string."
//! );
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `jsonstruct-core` internally.
//! - Validation holds no shared mutable state; one adapter may serve many
//!   threads.
//! - Document failures are values, never errors. `Err` means the schema,
//!   the input text, or the configured limits are at fault.

pub mod adapter;
pub mod evaluate;
pub mod format;
pub mod message;
pub mod resolve;
pub mod result;
pub mod structure;
pub mod violation;

pub use adapter::{JsonInput, ValidationAdapter};
pub use evaluate::Evaluator;
pub use format::{FormatChecker, FormatRegistry};
pub use message::{render_violation, render_within};
pub use resolve::{resolve, DefinitionRef};
pub use result::ValidationResult;
pub use structure::{keyword, Constraints, SchemaNode, Structure};
pub use violation::{Violation, ViolationKind};
