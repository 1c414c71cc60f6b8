//! # JSON Type — The `type` Keyword Taxonomy
//!
//! Defines the `JsonType` enum: the closed set of values the `type` keyword
//! may take, and the classification of runtime JSON values into those same
//! types. Every dispatch on a schema type is an exhaustive `match` on this
//! enum, so adding a type forces every consumer to handle it.
//!
//! ## Wire Format
//!
//! | Variant | Wire value |
//! |---------|------------|
//! | `Object` | `"object"` |
//! | `Array` | `"array"` |
//! | `String` | `"string"` |
//! | `Integer` | `"integer"` |
//! | `Number` | `"number"` |
//! | `Boolean` | `"boolean"` |
//! | `Null` | `"null"` |
//!
//! The wire value doubles as the type name printed in validation messages.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::str::FromStr;
use thiserror::Error;

/// A JSON type as named by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// A JSON string.
    String,
    /// A number without a fractional part.
    Integer,
    /// Any JSON number, integral or not.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
}

/// The `type` keyword named a type outside [`JsonType`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown json type: {0:?}")]
pub struct UnknownJsonType(pub String);

impl JsonType {
    /// Returns every type in wire-table order.
    pub fn all() -> &'static [JsonType] {
        &[
            Self::Object,
            Self::Array,
            Self::String,
            Self::Integer,
            Self::Number,
            Self::Boolean,
            Self::Null,
        ]
    }

    /// Returns the wire identifier, which is also the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Classify a runtime value.
    ///
    /// Numbers are `Integer` when they carry no fractional part, including
    /// floats such as `2.0`; everything else numeric is `Number`.
    pub fn of(value: &Value) -> JsonType {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) => {
                if is_integral(n) {
                    Self::Integer
                } else {
                    Self::Number
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether a value of type `actual` satisfies a schema demanding `self`.
    ///
    /// `Number` admits integers; every other type admits only itself.
    pub fn accepts(&self, actual: JsonType) -> bool {
        match self {
            Self::Number => matches!(actual, Self::Number | Self::Integer),
            expected => *expected == actual,
        }
    }
}

fn is_integral(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonType {
    type Err = UnknownJsonType;

    /// Parse a type from its wire identifier. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            other => Err(UnknownJsonType(other.to_string())),
        }
    }
}
