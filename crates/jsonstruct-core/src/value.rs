//! # Value Helpers — Rendering, Equality, Ordering
//!
//! Small, pure helpers over `serde_json::Value` shared by the evaluator and
//! the message renderer.
//!
//! - [`render`] turns a value into the text quoted inside messages.
//! - [`json_equal`] is JSON equality as used by `const` and `enum`:
//!   numbers compare by value, so `1` equals `1.0`.
//! - [`compare_numbers`] orders two numbers exactly across the i64, u64 and
//!   f64 representations `serde_json` may hold.

use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Render a value for inclusion in a validation message.
///
/// Strings are printed raw (no quotes), numbers with their JSON display,
/// booleans as `true`/`false`, null as `null`, and containers as compact
/// JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Render a list of values joined by `", "`.
pub fn render_list(values: &[Value]) -> String {
    values.iter().map(render).collect::<Vec<_>>().join(", ")
}

/// Length of a string in Unicode scalar values.
pub fn char_length(s: &str) -> u64 {
    s.chars().count() as u64
}

/// Order two JSON numbers without losing precision on large integers.
///
/// Returns `None` only when a float comparison is undefined.
pub fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_u64()) {
        return Some(if x < 0 { Ordering::Less } else { (x as u64).cmp(&y) });
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_i64()) {
        return Some(if y < 0 { Ordering::Greater } else { x.cmp(&(y as u64)) });
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// JSON equality: structural, with numbers compared by value.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|f| serde_json::json!(f)),
            "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// JSON equality is reflexive.
        #[test]
        fn json_equal_reflexive(value in json_value()) {
            prop_assert!(json_equal(&value, &value));
        }

        /// Number ordering agrees with integer ordering.
        #[test]
        fn compare_numbers_matches_i64(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(
                compare_numbers(&Number::from(a), &Number::from(b)),
                Some(a.cmp(&b))
            );
        }
    }
}
