//! # jsonstruct-core — Foundational Types for jsonstruct
//!
//! This crate is the leaf of the jsonstruct workspace. It defines the
//! primitives shared by the schema model and the evaluator. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `JsonType` enum.** The `type` keyword and runtime value
//!    classification share one closed enum with exhaustive `match`
//!    everywhere. No string comparisons on type names.
//!
//! 2. **Paths are structured.** `FieldPath` keeps keys and indices apart so
//!    messages can say `field 'x'` or `index '3'` without re-parsing.
//!
//! 3. **Failures are not errors.** A document that violates its schema is a
//!    normal outcome. The error types here describe broken schemas, bad JSON
//!    text, and bad configuration only.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsonstruct-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod json_type;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::ValidatorConfig;
pub use error::{ConfigError, SchemaError, StructureError};
pub use json_type::{JsonType, UnknownJsonType};
pub use path::{FieldPath, PathSegment};
pub use value::{char_length, compare_numbers, json_equal, render, render_list};
