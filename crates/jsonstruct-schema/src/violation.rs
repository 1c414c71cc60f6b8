//! # Violations — Structured Failure Records
//!
//! A [`Violation`] is what the evaluator produces when a value breaks a
//! constraint: where it happened and which keyword failed, with the
//! expected and actual data needed to explain it. Combinators (`anyOf`,
//! `allOf`, `contains`) nest the violations of their branches.
//!
//! Turning a violation into an English sentence is the job of
//! [`crate::message`].

use jsonstruct_core::{FieldPath, JsonType};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::structure::keyword;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Location of the offending value in the document.
    pub path: FieldPath,
    /// The keyword that failed and its details.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

/// Which keyword failed, with what it expected and what it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "keyword", rename_all = "camelCase")]
pub enum ViolationKind {
    /// The value has the wrong JSON type.
    Type {
        expected: JsonType,
        actual: JsonType,
    },
    /// An object lacks a required member.
    Required {
        missing: String,
        /// Type of the value the member is missing from.
        within: JsonType,
    },
    /// An object has members outside `properties`.
    AdditionalProperties {
        unexpected: Vec<String>,
    },
    /// A string is too short.
    MinLength {
        min: u64,
        length: u64,
    },
    /// A string is too long.
    MaxLength {
        max: u64,
        length: u64,
    },
    /// A string fails its named format.
    Format {
        format: String,
        value: String,
    },
    /// The value differs from `const`.
    Const {
        expected: Value,
        actual: Value,
    },
    /// The value is not among the `enum` options.
    Enum {
        expected: Vec<Value>,
        actual: Value,
    },
    /// An array has too few elements.
    MinItems {
        min: u64,
        count: u64,
    },
    /// An array has too many elements.
    MaxItems {
        max: u64,
        count: u64,
    },
    /// No element matched; one violation per element.
    Contains {
        errors: Vec<Violation>,
    },
    /// A number is below `minimum`.
    Minimum {
        min: Number,
        actual: Number,
    },
    /// A number is above `maximum`.
    Maximum {
        max: Number,
        actual: Number,
    },
    /// The number of matching `oneOf` branches is not exactly one.
    OneOf {
        matched: usize,
    },
    /// No branch matched; one violation per branch.
    AnyOf {
        errors: Vec<Violation>,
    },
    /// The first branch that failed.
    AllOf {
        error: Box<Violation>,
    },
}

impl ViolationKind {
    /// The schema keyword this violation reports.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Type { .. } => keyword::TYPE,
            Self::Required { .. } => keyword::REQUIRED,
            Self::AdditionalProperties { .. } => keyword::ADDITIONAL_PROPERTIES,
            Self::MinLength { .. } => keyword::MIN_LENGTH,
            Self::MaxLength { .. } => keyword::MAX_LENGTH,
            Self::Format { .. } => keyword::FORMAT,
            Self::Const { .. } => keyword::CONST,
            Self::Enum { .. } => keyword::ENUM,
            Self::MinItems { .. } => keyword::MIN_ITEMS,
            Self::MaxItems { .. } => keyword::MAX_ITEMS,
            Self::Contains { .. } => keyword::CONTAINS,
            Self::Minimum { .. } => keyword::MINIMUM,
            Self::Maximum { .. } => keyword::MAXIMUM,
            Self::OneOf { .. } => keyword::ONE_OF,
            Self::AnyOf { .. } => keyword::ANY_OF,
            Self::AllOf { .. } => keyword::ALL_OF,
        }
    }
}

impl Violation {
    /// Build a violation at a copy of the current path.
    pub fn at(path: &FieldPath, kind: ViolationKind) -> Self {
        Self {
            path: path.clone(),
            kind,
        }
    }

    /// The schema keyword this violation reports.
    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }
}
