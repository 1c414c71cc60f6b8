//! Integration tests: validate documents end to end through
//! `ValidationAdapter`, asserting the exact user-facing messages.

use jsonstruct_schema::{Structure, ValidationAdapter};
use serde_json::{json, Value};

fn validate(document: Value, schema: &Value) -> jsonstruct_schema::ValidationResult {
    ValidationAdapter::create_default()
        .validate(&document, schema)
        .unwrap()
}

fn assert_valid(document: Value, schema: &Value) {
    let result = validate(document.clone(), schema);
    assert!(result.is_valid(), "expected {document} to be valid, got: {}", result.error_message());
    assert!(result.error_message().is_empty());
}

fn assert_message(document: Value, schema: &Value, expected: &str) {
    let result = validate(document.clone(), schema);
    assert!(!result.is_valid(), "expected {document} to be invalid");
    assert_eq!(result.error_message(), expected);
}

fn details_schema(first_name: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer"},
            "details": {
                "type": "object",
                "properties": {
                    "first_name": first_name,
                    "email": {"type": "string"}
                },
                "required": required
            }
        },
        "required": ["id", "details"]
    })
}

#[test]
fn test_valid_document_with_reference() {
    let schema = json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer"},
            "email": {"type": "string", "maxLength": 10},
            "another_obj": {"$ref": "#/definitions/obj"}
        },
        "required": ["id", "another_obj"],
        "definitions": {
            "obj": {
                "type": "object",
                "properties": {
                    "name": {"type": "string", "maxLength": 10},
                    "field_2": {"type": "string"}
                },
                "required": ["field_2", "name"]
            }
        }
    });
    let document = r#"{"id": 15, "another_obj": {"name": "ccccccc", "field_2": "ddddd"}}"#;
    let result = ValidationAdapter::create_default()
        .validate(document, &schema)
        .unwrap();
    assert!(result.is_valid());
    assert_eq!(result.error_message(), "");
}

#[test]
fn test_missing_required_field() {
    let schema = details_schema(json!({"type": "string"}), &["first_name"]);
    let result = ValidationAdapter::create_default()
        .validate_by_json_structure(r#"{"id": 15, "details": {}}"#, &schema.to_string())
        .unwrap();
    assert!(!result.is_valid());
    assert_eq!(
        result.error_message(),
        "Missing field 'first_name', within object at field 'details'."
    );
}

#[test]
fn test_max_length() {
    let schema = details_schema(json!({"type": "string", "maxLength": 10}), &["first_name"]);
    assert_message(
        json!({"id": 15, "details": {"first_name": "a".repeat(25)}}),
        &schema,
        "Expect the length of field 'first_name' to not exceed 10, actual length is 25.",
    );
}

#[test]
fn test_min_length() {
    let schema = details_schema(json!({"type": "string", "minLength": 5}), &[]);
    assert_message(
        json!({"id": 15, "details": {"first_name": "abc"}}),
        &schema,
        "Expect the length of field 'first_name' to exceed 5, actual length is 3.",
    );
}

#[test]
fn test_numeric_range() {
    let schema = json!({
        "type": "object",
        "properties": {
            "rating": {"type": "number", "minimum": 1.1, "maximum": 4.9}
        },
        "required": ["rating"]
    });
    assert_valid(json!({"rating": 2.2}), &schema);
    assert_message(
        json!({"rating": 0.9}),
        &schema,
        "Expect the value of field 'rating' to exceed 1.1, actual value is 0.9.",
    );
    assert_message(
        json!({"rating": 6.1}),
        &schema,
        "Expect the value of field 'rating' to not exceed 4.9, actual value is 6.1.",
    );
}

#[test]
fn test_format() {
    let schema = details_schema(
        json!({"type": "string", "format": "param_alpha"}),
        &["first_name"],
    );
    assert_message(
        json!({"id": 15, "details": {"first_name": "Hello world"}}),
        &schema,
        "The field 'first_name' value 'Hello world' failed the format 'param_alpha' of type 'string'.",
    );
    assert_valid(json!({"id": 15, "details": {"first_name": "Hello"}}), &schema);
}

#[test]
fn test_array_cardinality() {
    let schema = json!({
        "type": "object",
        "properties": {
            "ids": {"type": "array", "minItems": 2, "maxItems": 5}
        }
    });
    assert_valid(json!({"ids": [42, 43, 44]}), &schema);
    assert_message(
        json!({"ids": [52]}),
        &schema,
        "Expect the min items of field 'ids' to be 2, but actual count is 1.",
    );
    assert_message(
        json!({"ids": [52, 12, 19, 54, 654, 3]}),
        &schema,
        "Expect the max items of field 'ids' to be 5, but actual count is 6.",
    );
}

#[test]
fn test_constant() {
    let schema = json!({
        "type": "object",
        "properties": {"id": {"type": "integer", "const": 42}},
        "required": ["id"]
    });
    assert_valid(json!({"id": 42}), &schema);
    assert_message(
        json!({"id": 52}),
        &schema,
        "Field 'id' does not match value '42', but receive '52'.",
    );
}

#[test]
fn test_one_of() {
    let schema = json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "integer",
                "oneOf": [{"const": 15}, {"const": 42}]
            }
        }
    });
    assert_valid(json!({"id": 42}), &schema);
    assert_valid(json!({"id": 15}), &schema);
    for id in [11, 0, -1] {
        assert_message(
            json!({"id": id}),
            &schema,
            "Expect exactly 1 matched of data model, but there are 0 matches.",
        );
    }
}

#[test]
fn test_any_of_with_contains() {
    let schema = json!({
        "type": "object",
        "properties": {
            "ids": {
                "type": "array",
                "anyOf": [
                    {"contains": {"const": 15}},
                    {"contains": {"const": 42}}
                ]
            }
        }
    });
    assert_valid(json!({"ids": [42, 12]}), &schema);
    assert_valid(json!({"ids": [15]}), &schema);
    assert_message(
        json!({"ids": [2]}),
        &schema,
        "Item does not match value '15', but receive '2'. Or item does not match value '42', but receive '2'.",
    );
}

#[test]
fn test_enum() {
    let schema = json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "enum": [1, 2, 3, 4]}
        }
    });
    for id in 1..=4 {
        assert_valid(json!({"id": id}), &schema);
    }
    for id in 5..=9 {
        assert_message(
            json!({"id": id}),
            &schema,
            &format!("Expect the value of field 'id' to be either of 1, 2, 3, 4, but receive '{id}'."),
        );
    }
}

#[test]
fn test_invalid_type() {
    let schema = json!({
        "type": "object",
        "properties": {"id": {"type": "integer"}}
    });
    assert_message(
        json!({"id": "hello_world"}),
        &schema,
        "Expect type of field 'id' to be integer, but receive type string.",
    );
}

#[test]
fn test_no_additional_properties() {
    let schema = json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"}
        },
        "required": ["id", "name"],
        "additionalProperties": false
    });
    assert_valid(json!({"id": 42, "name": "structure"}), &schema);
    assert_message(
        json!({"id": 54, "name": "structure", "additional": "x"}),
        &schema,
        "There are unexpected additional properties",
    );
}

#[test]
fn test_additional_properties_allowed_by_default() {
    let schema = json!({
        "type": "object",
        "properties": {"id": {"type": "integer"}}
    });
    assert_valid(json!({"id": 42}), &schema);
    assert_valid(json!({"id": 42, "additional": "xxx"}), &schema);
}

#[test]
fn test_all_of_reports_failing_branch() {
    let schema = json!({
        "properties": {
            "name": {
                "allOf": [{"type": "string"}, {"minLength": 2}]
            }
        }
    });
    assert_valid(json!({"name": "ok"}), &schema);
    assert_message(
        json!({"name": "x"}),
        &schema,
        "Expect the length of field 'name' to exceed 2, actual length is 1.",
    );
}

#[test]
fn test_error_inside_array_names_index() {
    let schema = json!({
        "properties": {
            "people": {
                "items": {
                    "type": "object",
                    "required": ["name"]
                }
            }
        }
    });
    assert_message(
        json!({"people": [{"name": "a"}, {}]}),
        &schema,
        "Missing field 'name', within object at index '1'.",
    );
}

#[test]
fn test_value_keywords_on_array_elements_say_field() {
    let schema = json!({
        "properties": {
            "names": {"items": {"maxLength": 2, "format": "param_alpha"}},
            "scores": {"items": {"minimum": 5}},
            "levels": {"items": {"enum": [1, 2]}}
        }
    });
    assert_message(
        json!({"names": ["abc"]}),
        &schema,
        "Expect the length of field '0' to not exceed 2, actual length is 3.",
    );
    assert_message(
        json!({"names": ["ok", "a b"]}),
        &schema,
        "The field '1' value 'a b' failed the format 'param_alpha' of type 'string'.",
    );
    assert_message(
        json!({"scores": [1]}),
        &schema,
        "Expect the value of field '0' to exceed 5, actual value is 1.",
    );
    assert_message(
        json!({"levels": [3]}),
        &schema,
        "Expect the value of field '0' to be either of 1, 2, but receive '3'.",
    );
    assert_message(
        json!({"levels": ["x"], "names": []}),
        &schema,
        "Expect the value of field '0' to be either of 1, 2, but receive 'x'.",
    );
}

#[test]
fn test_reference_equivalent_to_inline() {
    let inline = json!({
        "type": "object",
        "properties": {
            "child": {"type": "object", "required": ["x"], "properties": {"x": {"type": "string"}}}
        }
    });
    let referenced = json!({
        "type": "object",
        "properties": {"child": {"$ref": "#/definitions/child"}},
        "definitions": {
            "child": {"type": "object", "required": ["x"], "properties": {"x": {"type": "string"}}}
        }
    });
    for document in [
        json!({"child": {"x": "ok"}}),
        json!({"child": {}}),
        json!({"child": {"x": 1}}),
        json!({"child": "nope"}),
    ] {
        assert_eq!(
            validate(document.clone(), &inline),
            validate(document, &referenced)
        );
    }
}

#[test]
fn test_validation_is_idempotent() {
    let adapter = ValidationAdapter::create_default();
    let schema = details_schema(json!({"type": "string", "maxLength": 3}), &["first_name"]);
    let structure = Structure::parse(&schema).unwrap();
    let document = json!({"id": 1, "details": {"first_name": "abcdef"}});
    let first = adapter.validate_structure(&document, &structure).unwrap();
    let second = adapter.validate_structure(&document, &structure).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, adapter.validate(&document, &schema).unwrap());
}

#[test]
fn test_dangling_reference_is_an_error() {
    let schema = json!({"properties": {"a": {"$ref": "#/definitions/missing"}}});
    let err = ValidationAdapter::create_default()
        .validate(&json!({}), &schema)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "schema error: unresolved reference '#/definitions/missing'"
    );
}
