//! # Constraint Evaluator — Fail-Fast Recursive Descent
//!
//! Walks a document against a [`Structure`] and stops at the first
//! violated constraint. The walk is deterministic: the same document and
//! schema always yield the same violation.
//!
//! ## Evaluation Order
//!
//! For each node, after resolving `$ref`:
//!
//! 1. `type`
//! 2. `const`, then `enum`
//! 3. objects: `additionalProperties`, `required` (first missing member in
//!    declaration order), then `properties` in declaration order
//! 4. arrays: `minItems`, `maxItems`, `contains`, then `items` per element
//! 5. strings: `minLength`, `maxLength`, `format`
//! 6. numbers: `minimum`, `maximum`
//! 7. `allOf`, `anyOf`, `oneOf`
//!
//! Type-specific keywords only apply to values of that type.
//!
//! ## Errors
//!
//! A violation is `Ok(Some(_))`. `Err` is reserved for problems with the
//! schema or the configured limits, which abort evaluation outright.

use std::cmp::Ordering;

use jsonstruct_core::{
    char_length, compare_numbers, json_equal, FieldPath, JsonType, SchemaError, ValidatorConfig,
};
use serde_json::{Map, Number, Value};

use crate::format::FormatRegistry;
use crate::resolve::resolve;
use crate::structure::{
    ArrayConstraints, Constraints, NumericConstraints, ObjectConstraints, SchemaNode,
    StringConstraints, Structure,
};
use crate::violation::{Violation, ViolationKind};

/// Outcome of evaluating one node.
pub type Evaluation = Result<Option<Violation>, SchemaError>;

/// Return the violation from the enclosing check if there is one.
macro_rules! fail_fast {
    ($check:expr) => {
        if let Some(violation) = $check {
            return Ok(Some(violation));
        }
    };
}

/// Evaluates documents against one parsed [`Structure`].
#[derive(Debug)]
pub struct Evaluator<'a> {
    structure: &'a Structure,
    formats: &'a FormatRegistry,
    config: &'a ValidatorConfig,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// An evaluator at depth zero.
    pub fn new(
        structure: &'a Structure,
        formats: &'a FormatRegistry,
        config: &'a ValidatorConfig,
    ) -> Self {
        Self {
            structure,
            formats,
            config,
            depth: 0,
        }
    }

    /// Evaluate a whole document against the structure's root node.
    pub fn evaluate_document(&mut self, document: &Value) -> Evaluation {
        let structure: &'a Structure = self.structure;
        let mut path = FieldPath::root();
        self.evaluate(document, structure.root(), &mut path)
    }

    /// Evaluate `value`, located at `path`, against `node`.
    ///
    /// `path` is restored to its original state before a violation or
    /// success is returned.
    ///
    /// # Errors
    ///
    /// - `SchemaError::DepthExceeded` if nesting passes `max_depth`.
    /// - Reference and format errors from the schema.
    pub fn evaluate(&mut self, value: &Value, node: &'a SchemaNode, path: &mut FieldPath) -> Evaluation {
        self.depth += 1;
        let outcome = if self.depth > self.config.max_depth {
            tracing::warn!(
                limit = self.config.max_depth,
                instance = %path,
                "evaluation depth limit reached"
            );
            Err(SchemaError::DepthExceeded {
                limit: self.config.max_depth,
            })
        } else {
            self.evaluate_node(value, node, path)
        };
        self.depth -= 1;
        outcome
    }

    fn evaluate_node(&mut self, value: &Value, node: &'a SchemaNode, path: &mut FieldPath) -> Evaluation {
        let structure: &'a Structure = self.structure;
        let constraints = resolve(node, structure.definitions(), self.config.max_reference_chain)?;

        fail_fast!(check_type(constraints, value, path));
        fail_fast!(check_const(constraints, value, path));
        fail_fast!(check_enum(constraints, value, path));

        match value {
            Value::Object(members) => fail_fast!(self.check_object(&constraints.object, members, path)?),
            Value::Array(items) => fail_fast!(self.check_array(&constraints.array, items, path)?),
            Value::String(s) => fail_fast!(self.check_string(&constraints.string, s, path)?),
            Value::Number(n) => fail_fast!(check_numeric(&constraints.numeric, n, path)),
            Value::Bool(_) | Value::Null => {}
        }

        fail_fast!(self.check_all_of(&constraints.all_of, value, path)?);
        fail_fast!(self.check_any_of(&constraints.any_of, value, path)?);
        fail_fast!(self.check_one_of(&constraints.one_of, value, path)?);
        Ok(None)
    }

    fn check_object(
        &mut self,
        object: &'a ObjectConstraints,
        members: &Map<String, Value>,
        path: &mut FieldPath,
    ) -> Evaluation {
        if !object.additional_properties {
            let unexpected: Vec<String> = members
                .keys()
                .filter(|key| !object.properties.contains_key(key.as_str()))
                .cloned()
                .collect();
            if !unexpected.is_empty() {
                return Ok(Some(Violation::at(
                    path,
                    ViolationKind::AdditionalProperties { unexpected },
                )));
            }
        }

        if let Some(missing) = object.required.iter().find(|name| !members.contains_key(name.as_str())) {
            return Ok(Some(Violation::at(
                path,
                ViolationKind::Required {
                    missing: missing.clone(),
                    within: JsonType::Object,
                },
            )));
        }

        for (name, child) in &object.properties {
            let Some(member) = members.get(name) else {
                continue;
            };
            path.push_key(name.as_str());
            let outcome = self.evaluate(member, child, path);
            path.pop();
            fail_fast!(outcome?);
        }
        Ok(None)
    }

    fn check_array(&mut self, array: &'a ArrayConstraints, items: &[Value], path: &mut FieldPath) -> Evaluation {
        let count = items.len() as u64;
        if let Some(min) = array.min_items.filter(|min| count < *min) {
            return Ok(Some(Violation::at(path, ViolationKind::MinItems { min, count })));
        }
        if let Some(max) = array.max_items.filter(|max| count > *max) {
            return Ok(Some(Violation::at(path, ViolationKind::MaxItems { max, count })));
        }

        if let Some(contains) = &array.contains {
            let mut errors = Vec::new();
            let mut matched = false;
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                let outcome = self.evaluate(item, contains, path);
                path.pop();
                match outcome? {
                    None => {
                        matched = true;
                        break;
                    }
                    Some(violation) => errors.push(violation),
                }
            }
            if !matched {
                return Ok(Some(Violation::at(path, ViolationKind::Contains { errors })));
            }
        }

        if let Some(schema) = &array.items {
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                let outcome = self.evaluate(item, schema, path);
                path.pop();
                fail_fast!(outcome?);
            }
        }
        Ok(None)
    }

    fn check_string(&self, string: &StringConstraints, s: &str, path: &FieldPath) -> Evaluation {
        let length = char_length(s);
        if let Some(min) = string.min_length.filter(|min| length < *min) {
            return Ok(Some(Violation::at(path, ViolationKind::MinLength { min, length })));
        }
        if let Some(max) = string.max_length.filter(|max| length > *max) {
            return Ok(Some(Violation::at(path, ViolationKind::MaxLength { max, length })));
        }
        if let Some(format) = &string.format {
            if !self.formats.check(format, s)? {
                return Ok(Some(Violation::at(
                    path,
                    ViolationKind::Format {
                        format: format.clone(),
                        value: s.to_string(),
                    },
                )));
            }
        }
        Ok(None)
    }

    /// The first failing branch, wrapped so the message keeps its context.
    fn check_all_of(&mut self, branches: &'a [SchemaNode], value: &Value, path: &mut FieldPath) -> Evaluation {
        for branch in branches {
            if let Some(error) = self.evaluate(value, branch, path)? {
                return Ok(Some(Violation::at(
                    path,
                    ViolationKind::AllOf {
                        error: Box::new(error),
                    },
                )));
            }
        }
        Ok(None)
    }

    fn check_any_of(&mut self, branches: &'a [SchemaNode], value: &Value, path: &mut FieldPath) -> Evaluation {
        if branches.is_empty() {
            return Ok(None);
        }
        let mut errors = Vec::with_capacity(branches.len());
        for branch in branches {
            match self.evaluate(value, branch, path)? {
                None => return Ok(None),
                Some(violation) => errors.push(violation),
            }
        }
        Ok(Some(Violation::at(path, ViolationKind::AnyOf { errors })))
    }

    /// Every branch is evaluated; exactly one must match.
    fn check_one_of(&mut self, branches: &'a [SchemaNode], value: &Value, path: &mut FieldPath) -> Evaluation {
        if branches.is_empty() {
            return Ok(None);
        }
        let mut matched = 0usize;
        for branch in branches {
            if self.evaluate(value, branch, path)?.is_none() {
                matched += 1;
            }
        }
        if matched == 1 {
            Ok(None)
        } else {
            Ok(Some(Violation::at(path, ViolationKind::OneOf { matched })))
        }
    }
}

fn check_type(constraints: &Constraints, value: &Value, path: &FieldPath) -> Option<Violation> {
    let expected = constraints.json_type?;
    let actual = JsonType::of(value);
    (!expected.accepts(actual)).then(|| Violation::at(path, ViolationKind::Type { expected, actual }))
}

fn check_const(constraints: &Constraints, value: &Value, path: &FieldPath) -> Option<Violation> {
    let expected = constraints.constant.as_ref()?;
    (!json_equal(expected, value)).then(|| {
        Violation::at(
            path,
            ViolationKind::Const {
                expected: expected.clone(),
                actual: value.clone(),
            },
        )
    })
}

fn check_enum(constraints: &Constraints, value: &Value, path: &FieldPath) -> Option<Violation> {
    let allowed = constraints.enumeration.as_ref()?;
    (!allowed.iter().any(|candidate| json_equal(candidate, value))).then(|| {
        Violation::at(
            path,
            ViolationKind::Enum {
                expected: allowed.clone(),
                actual: value.clone(),
            },
        )
    })
}

fn check_numeric(numeric: &NumericConstraints, n: &Number, path: &FieldPath) -> Option<Violation> {
    if let Some(min) = &numeric.minimum {
        if compare_numbers(n, min) == Some(Ordering::Less) {
            return Some(Violation::at(
                path,
                ViolationKind::Minimum {
                    min: min.clone(),
                    actual: n.clone(),
                },
            ));
        }
    }
    if let Some(max) = &numeric.maximum {
        if compare_numbers(n, max) == Some(Ordering::Greater) {
            return Some(Violation::at(
                path,
                ViolationKind::Maximum {
                    max: max.clone(),
                    actual: n.clone(),
                },
            ));
        }
    }
    None
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn person_schema() -> Structure {
        Structure::parse(&json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer", "minimum": 0},
                "name": {"type": "string", "minLength": 1, "maxLength": 20},
                "tags": {"type": "array", "maxItems": 4, "items": {"type": "string"}}
            },
            "required": ["id", "name"]
        }))
        .unwrap()
    }

    proptest! {
        #[test]
        fn conforming_documents_pass(
            id in 0i64..1_000_000,
            name in "[a-z]{1,20}",
            tags in prop::collection::vec("[a-z]{0,5}", 0..=4),
        ) {
            let structure = person_schema();
            let formats = FormatRegistry::default();
            let config = ValidatorConfig::default();
            let document = json!({"id": id, "name": name, "tags": tags});
            let outcome = Evaluator::new(&structure, &formats, &config).evaluate_document(&document);
            prop_assert_eq!(outcome, Ok(None));
        }

        #[test]
        fn evaluation_is_deterministic(id in any::<i64>(), name in ".{0,30}") {
            let structure = person_schema();
            let formats = FormatRegistry::default();
            let config = ValidatorConfig::default();
            let document = json!({"id": id, "name": name});
            let first = Evaluator::new(&structure, &formats, &config).evaluate_document(&document);
            let second = Evaluator::new(&structure, &formats, &config).evaluate_document(&document);
            prop_assert_eq!(first, second);
        }
    }
}
