//! # Reference Resolution
//!
//! A `$ref` names an entry of the root-level `definitions` table. Only the
//! local form `#/definitions/<name>` is supported; remote and arbitrary JSON
//! Pointer references are authoring errors.
//!
//! Resolution follows chains (a definition that is itself a `$ref`) until it
//! reaches inline constraints. The chain length is bounded, which also
//! catches cycles such as `a -> b -> a`.

use indexmap::IndexMap;
use jsonstruct_core::SchemaError;

use crate::structure::{Constraints, SchemaNode};

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A parsed `#/definitions/<name>` pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRef {
    pointer: String,
    name: String,
}

impl DefinitionRef {
    /// Parse a `$ref` value.
    ///
    /// The name is a single JSON Pointer reference token, so `~1` and `~0`
    /// decode to `/` and `~`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedReference` for anything other than
    /// `#/definitions/<name>` with a non-empty, single-token name.
    pub fn parse(pointer: &str) -> Result<Self, SchemaError> {
        let token = pointer
            .strip_prefix(DEFINITIONS_PREFIX)
            .filter(|token| !token.is_empty() && !token.contains('/'))
            .ok_or_else(|| SchemaError::UnsupportedReference(pointer.to_string()))?;
        Ok(Self {
            pointer: pointer.to_string(),
            name: token.replace("~1", "/").replace("~0", "~"),
        })
    }

    /// The definition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original `$ref` string.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }
}

/// Resolve a node to the constraints it stands for.
///
/// Inline nodes resolve to themselves. References are looked up in
/// `definitions`, following at most `max_chain` hops.
///
/// # Errors
///
/// - `SchemaError::UnresolvedReference` if a name is not in `definitions`.
/// - `SchemaError::ReferenceCycle` if the chain is longer than `max_chain`.
pub fn resolve<'a>(
    node: &'a SchemaNode,
    definitions: &'a IndexMap<String, SchemaNode>,
    max_chain: usize,
) -> Result<&'a Constraints, SchemaError> {
    let mut current = node;
    let mut hops = 0usize;
    loop {
        match current {
            SchemaNode::Inline(constraints) => return Ok(constraints.as_ref()),
            SchemaNode::Reference(reference) => {
                if hops >= max_chain {
                    let start = match node {
                        SchemaNode::Reference(first) => first.pointer(),
                        SchemaNode::Inline(_) => reference.pointer(),
                    };
                    return Err(SchemaError::ReferenceCycle(start.to_string()));
                }
                hops += 1;
                current = definitions
                    .get(reference.name())
                    .ok_or_else(|| SchemaError::UnresolvedReference(reference.pointer().to_string()))?;
                tracing::trace!(reference = reference.pointer(), hops, "followed schema reference");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonstruct_core::JsonType;
    use serde_json::json;

    fn table(entries: serde_json::Value) -> IndexMap<String, SchemaNode> {
        entries
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), SchemaNode::parse(v).unwrap()))
            .collect()
    }

    #[test]
    fn test_parse_definition_ref() {
        let r = DefinitionRef::parse("#/definitions/obj").unwrap();
        assert_eq!(r.name(), "obj");
        assert_eq!(r.pointer(), "#/definitions/obj");
    }

    #[test]
    fn test_parse_decodes_escaped_token() {
        let r = DefinitionRef::parse("#/definitions/a~1b~0c").unwrap();
        assert_eq!(r.name(), "a/b~c");
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        for raw in [
            "#/definitions/",
            "#/definitions/a/b",
            "#/$defs/a",
            "#",
            "https://example.com/schema.json",
            "definitions/a",
        ] {
            assert_eq!(
                DefinitionRef::parse(raw).unwrap_err(),
                SchemaError::UnsupportedReference(raw.to_string()),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_inline_node_resolves_to_itself() {
        let node = SchemaNode::parse(&json!({"type": "string"})).unwrap();
        let definitions = IndexMap::new();
        let constraints = resolve(&node, &definitions, 4).unwrap();
        assert_eq!(constraints.json_type, Some(JsonType::String));
    }

    #[test]
    fn test_single_hop() {
        let definitions = table(json!({"obj": {"type": "object"}}));
        let node = SchemaNode::parse(&json!({"$ref": "#/definitions/obj"})).unwrap();
        let constraints = resolve(&node, &definitions, 4).unwrap();
        assert_eq!(constraints.json_type, Some(JsonType::Object));
    }

    #[test]
    fn test_chained_references_are_followed() {
        let definitions = table(json!({
            "a": {"$ref": "#/definitions/b"},
            "b": {"$ref": "#/definitions/c"},
            "c": {"type": "boolean"}
        }));
        let node = SchemaNode::parse(&json!({"$ref": "#/definitions/a"})).unwrap();
        let constraints = resolve(&node, &definitions, 4).unwrap();
        assert_eq!(constraints.json_type, Some(JsonType::Boolean));
    }

    #[test]
    fn test_cycle_is_detected() {
        let definitions = table(json!({
            "a": {"$ref": "#/definitions/b"},
            "b": {"$ref": "#/definitions/a"}
        }));
        let node = SchemaNode::parse(&json!({"$ref": "#/definitions/a"})).unwrap();
        assert_eq!(
            resolve(&node, &definitions, 8).unwrap_err(),
            SchemaError::ReferenceCycle("#/definitions/a".into())
        );
    }

    #[test]
    fn test_chain_longer_than_limit() {
        let definitions = table(json!({
            "a": {"$ref": "#/definitions/b"},
            "b": {"type": "null"}
        }));
        let node = SchemaNode::parse(&json!({"$ref": "#/definitions/a"})).unwrap();
        assert!(resolve(&node, &definitions, 2).is_ok());
        assert!(matches!(
            resolve(&node, &definitions, 1),
            Err(SchemaError::ReferenceCycle(_))
        ));
    }

    #[test]
    fn test_missing_definition() {
        let definitions = IndexMap::new();
        let node = SchemaNode::parse(&json!({"$ref": "#/definitions/nope"})).unwrap();
        assert_eq!(
            resolve(&node, &definitions, 4).unwrap_err(),
            SchemaError::UnresolvedReference("#/definitions/nope".into())
        );
    }
}
