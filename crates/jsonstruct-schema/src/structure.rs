//! # Schema Model — Parsed Structure Tree
//!
//! Turns a decoded schema document into a tree of [`SchemaNode`]s. The tree
//! is a closed tagged union: a node is either a `$ref` to a root-level
//! definition or an inline set of [`Constraints`]. The evaluator pattern
//! matches on it instead of probing for keys at runtime.
//!
//! ## Recognised Keywords
//!
//! `type`, `properties`, `required`, `additionalProperties`, `definitions`
//! (root only), `$ref`, `minLength`, `maxLength`, `format`, `minimum`,
//! `maximum`, `minItems`, `maxItems`, `items`, `contains`, `const`, `enum`,
//! `allOf`, `anyOf`, `oneOf`. Anything else (`title`, `description`,
//! `$schema`, ...) is ignored.
//!
//! ## Authoring Errors
//!
//! A keyword of the wrong shape is a [`SchemaError`] carrying a JSON Pointer
//! into the schema document. Parsing never reports document failures; it
//! only looks at the schema.
//!
//! Nesting is bounded: a node deeper than `max_depth` (counting the node
//! itself) fails with `SchemaError::DepthExceeded`.

use indexmap::IndexMap;
use jsonstruct_core::{JsonType, SchemaError, ValidatorConfig};
use serde_json::{Map, Number, Value};

use crate::resolve::DefinitionRef;

/// Keyword literals of the schema wire format.
pub mod keyword {
    /// Expected JSON type of the value.
    pub const TYPE: &str = "type";
    /// Child schemas of object members.
    pub const PROPERTIES: &str = "properties";
    /// Object members that must be present.
    pub const REQUIRED: &str = "required";
    /// `false` forbids members not listed in `properties`.
    pub const ADDITIONAL_PROPERTIES: &str = "additionalProperties";
    /// Root-level table of named schemas.
    pub const DEFINITIONS: &str = "definitions";
    /// Pointer to an entry of `definitions`.
    pub const REF: &str = "$ref";
    /// Lower bound on string length.
    pub const MIN_LENGTH: &str = "minLength";
    /// Upper bound on string length.
    pub const MAX_LENGTH: &str = "maxLength";
    /// Named string format checker.
    pub const FORMAT: &str = "format";
    /// Inclusive lower bound on numbers.
    pub const MINIMUM: &str = "minimum";
    /// Inclusive upper bound on numbers.
    pub const MAXIMUM: &str = "maximum";
    /// Lower bound on array length.
    pub const MIN_ITEMS: &str = "minItems";
    /// Upper bound on array length.
    pub const MAX_ITEMS: &str = "maxItems";
    /// Schema every array element must satisfy.
    pub const ITEMS: &str = "items";
    /// Schema at least one array element must satisfy.
    pub const CONTAINS: &str = "contains";
    /// Exact value.
    pub const CONST: &str = "const";
    /// Set of allowed values.
    pub const ENUM: &str = "enum";
    /// Every branch must match.
    pub const ALL_OF: &str = "allOf";
    /// At least one branch must match.
    pub const ANY_OF: &str = "anyOf";
    /// Exactly one branch must match.
    pub const ONE_OF: &str = "oneOf";
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A `$ref` to a root-level definition. Sibling keywords are ignored.
    Reference(DefinitionRef),
    /// A node carrying its own constraints.
    Inline(Box<Constraints>),
}

/// Constraints declared directly on a node.
///
/// Type-specific groups only apply to values of that type, so a branch such
/// as `{"const": 15}` is a complete node on its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constraints {
    /// The `type` keyword.
    pub json_type: Option<JsonType>,
    /// The `const` keyword.
    pub constant: Option<Value>,
    /// The `enum` keyword.
    pub enumeration: Option<Vec<Value>>,
    /// Keywords applying to objects.
    pub object: ObjectConstraints,
    /// Keywords applying to arrays.
    pub array: ArrayConstraints,
    /// Keywords applying to strings.
    pub string: StringConstraints,
    /// Keywords applying to numbers.
    pub numeric: NumericConstraints,
    /// The `allOf` branches.
    pub all_of: Vec<SchemaNode>,
    /// The `anyOf` branches.
    pub any_of: Vec<SchemaNode>,
    /// The `oneOf` branches.
    pub one_of: Vec<SchemaNode>,
}

/// Object keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectConstraints {
    /// Member schemas in declaration order.
    pub properties: IndexMap<String, SchemaNode>,
    /// Members that must be present, in declaration order.
    pub required: Vec<String>,
    /// Whether members outside `properties` are allowed. Defaults to `true`.
    pub additional_properties: bool,
}

impl Default for ObjectConstraints {
    fn default() -> Self {
        Self {
            properties: IndexMap::new(),
            required: Vec::new(),
            additional_properties: true,
        }
    }
}

/// Array keywords.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayConstraints {
    /// Schema applied to every element.
    pub items: Option<Box<SchemaNode>>,
    /// Schema at least one element must satisfy.
    pub contains: Option<Box<SchemaNode>>,
    /// Fewest elements allowed.
    pub min_items: Option<u64>,
    /// Most elements allowed.
    pub max_items: Option<u64>,
}

/// String keywords.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringConstraints {
    /// Shortest length allowed, in characters.
    pub min_length: Option<u64>,
    /// Longest length allowed, in characters.
    pub max_length: Option<u64>,
    /// Name of a registered format checker.
    pub format: Option<String>,
}

/// Numeric keywords. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericConstraints {
    /// Smallest value allowed.
    pub minimum: Option<Number>,
    /// Largest value allowed.
    pub maximum: Option<Number>,
}

/// A parsed schema document: the root node plus its `definitions` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    root: SchemaNode,
    definitions: IndexMap<String, SchemaNode>,
}

impl Structure {
    /// Parse a decoded schema document.
    ///
    /// Every `$ref` in the tree is checked against `definitions` up front,
    /// so a dangling reference fails here even if no document ever reaches
    /// it.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the schema is malformed or references a
    /// definition that does not exist.
    pub fn parse(schema: &Value) -> Result<Self, SchemaError> {
        Self::parse_with_limit(schema, ValidatorConfig::default().max_depth)
    }

    /// Parse with an explicit nesting limit.
    ///
    /// # Errors
    ///
    /// As [`Structure::parse`], plus `SchemaError::DepthExceeded` when any
    /// node (the root or a definition) nests deeper than `max_depth`.
    pub fn parse_with_limit(schema: &Value, max_depth: usize) -> Result<Self, SchemaError> {
        let map = expect_object(schema, "")?;
        let depth = Depth::new(max_depth);

        let mut definitions = IndexMap::new();
        if let Some(raw) = map.get(keyword::DEFINITIONS) {
            let pointer = child("", keyword::DEFINITIONS);
            let table = expect_object(raw, &pointer)?;
            for (name, definition) in table {
                let node = parse_node(definition, &child(&pointer, name), depth)?;
                definitions.insert(name.clone(), node);
            }
        }

        let root = parse_node(schema, "", depth)?;
        let structure = Self { root, definitions };
        structure.check_references()?;
        Ok(structure)
    }

    /// The root node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// The root-level `definitions` table, in declaration order.
    pub fn definitions(&self) -> &IndexMap<String, SchemaNode> {
        &self.definitions
    }

    /// Look up one definition by name.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions.get(name)
    }

    fn check_references(&self) -> Result<(), SchemaError> {
        let mut references = Vec::new();
        self.root.collect_references(&mut references);
        for definition in self.definitions.values() {
            definition.collect_references(&mut references);
        }
        match references
            .into_iter()
            .find(|r| !self.definitions.contains_key(r.name()))
        {
            Some(dangling) => Err(SchemaError::UnresolvedReference(dangling.pointer().to_string())),
            None => Ok(()),
        }
    }
}

impl SchemaNode {
    /// Parse a single node. Nested `definitions` are not collected; use
    /// [`Structure::parse`] for a whole document.
    pub fn parse(schema: &Value) -> Result<Self, SchemaError> {
        parse_node(schema, "", Depth::new(ValidatorConfig::default().max_depth))
    }

    /// The inline constraints, or `None` for a reference.
    pub fn constraints(&self) -> Option<&Constraints> {
        match self {
            Self::Inline(constraints) => Some(constraints.as_ref()),
            Self::Reference(_) => None,
        }
    }

    /// Append every `$ref` reachable from this node without following
    /// references.
    pub fn collect_references<'a>(&'a self, out: &mut Vec<&'a DefinitionRef>) {
        let constraints = match self {
            Self::Reference(reference) => {
                out.push(reference);
                return;
            }
            Self::Inline(constraints) => constraints,
        };
        for node in constraints.object.properties.values() {
            node.collect_references(out);
        }
        for node in [&constraints.array.items, &constraints.array.contains]
            .into_iter()
            .flatten()
        {
            node.collect_references(out);
        }
        for node in constraints
            .all_of
            .iter()
            .chain(&constraints.any_of)
            .chain(&constraints.one_of)
        {
            node.collect_references(out);
        }
    }
}

/// Remaining nesting budget while parsing.
#[derive(Debug, Clone, Copy)]
struct Depth {
    current: usize,
    limit: usize,
}

impl Depth {
    fn new(limit: usize) -> Self {
        Self { current: 0, limit }
    }

    fn enter(self, pointer: &str) -> Result<Self, SchemaError> {
        let current = self.current + 1;
        if current > self.limit {
            tracing::warn!(limit = self.limit, pointer, "schema nesting limit reached");
            return Err(SchemaError::DepthExceeded { limit: self.limit });
        }
        Ok(Self { current, ..self })
    }
}

fn parse_node(schema: &Value, pointer: &str, depth: Depth) -> Result<SchemaNode, SchemaError> {
    let depth = depth.enter(pointer)?;
    let map = expect_object(schema, pointer)?;

    if let Some(raw) = map.get(keyword::REF) {
        let raw = raw
            .as_str()
            .ok_or_else(|| invalid(&child(pointer, keyword::REF), "expected a string"))?;
        return Ok(SchemaNode::Reference(DefinitionRef::parse(raw)?));
    }

    let json_type = match map.get(keyword::TYPE) {
        Some(raw) => Some(parse_type(raw, &child(pointer, keyword::TYPE))?),
        None => None,
    };

    let enumeration = match map.get(keyword::ENUM) {
        Some(Value::Array(values)) if !values.is_empty() => Some(values.clone()),
        Some(_) => {
            return Err(invalid(
                &child(pointer, keyword::ENUM),
                "expected a non-empty array",
            ))
        }
        None => None,
    };

    Ok(SchemaNode::Inline(Box::new(Constraints {
        json_type,
        constant: map.get(keyword::CONST).cloned(),
        enumeration,
        object: parse_object(map, pointer, depth)?,
        array: parse_array(map, pointer, depth)?,
        string: parse_string(map, pointer)?,
        numeric: NumericConstraints {
            minimum: number(map, keyword::MINIMUM, pointer)?,
            maximum: number(map, keyword::MAXIMUM, pointer)?,
        },
        all_of: branches(map, keyword::ALL_OF, pointer, depth)?,
        any_of: branches(map, keyword::ANY_OF, pointer, depth)?,
        one_of: branches(map, keyword::ONE_OF, pointer, depth)?,
    })))
}

fn parse_type(raw: &Value, pointer: &str) -> Result<JsonType, SchemaError> {
    let name = raw
        .as_str()
        .ok_or_else(|| invalid(pointer, "expected a type name string"))?;
    name.parse().map_err(|_| SchemaError::UnknownType {
        name: name.to_string(),
        pointer: pointer.to_string(),
    })
}

fn parse_object(map: &Map<String, Value>, pointer: &str, depth: Depth) -> Result<ObjectConstraints, SchemaError> {
    let mut object = ObjectConstraints::default();

    if let Some(raw) = map.get(keyword::PROPERTIES) {
        let properties_pointer = child(pointer, keyword::PROPERTIES);
        for (name, node) in expect_object(raw, &properties_pointer)? {
            let node = parse_node(node, &child(&properties_pointer, name), depth)?;
            object.properties.insert(name.clone(), node);
        }
    }

    if let Some(raw) = map.get(keyword::REQUIRED) {
        let required_pointer = child(pointer, keyword::REQUIRED);
        let names = raw
            .as_array()
            .ok_or_else(|| invalid(&required_pointer, "expected an array of field names"))?;
        for name in names {
            let name = name
                .as_str()
                .ok_or_else(|| invalid(&required_pointer, "expected an array of field names"))?;
            if map.contains_key(keyword::PROPERTIES) && !object.properties.contains_key(name) {
                return Err(SchemaError::RequiredNotDeclared {
                    field: name.to_string(),
                    pointer: required_pointer,
                });
            }
            object.required.push(name.to_string());
        }
    }

    match map.get(keyword::ADDITIONAL_PROPERTIES) {
        Some(Value::Bool(allowed)) => object.additional_properties = *allowed,
        Some(_) => {
            return Err(invalid(
                &child(pointer, keyword::ADDITIONAL_PROPERTIES),
                "expected a boolean",
            ))
        }
        None => {}
    }

    Ok(object)
}

fn parse_array(map: &Map<String, Value>, pointer: &str, depth: Depth) -> Result<ArrayConstraints, SchemaError> {
    let items = match map.get(keyword::ITEMS) {
        Some(Value::Array(_)) => {
            return Err(invalid(
                &child(pointer, keyword::ITEMS),
                "positional item schemas are not supported, expected a single schema",
            ))
        }
        Some(raw) => Some(Box::new(parse_node(raw, &child(pointer, keyword::ITEMS), depth)?)),
        None => None,
    };
    let contains = match map.get(keyword::CONTAINS) {
        Some(raw) => Some(Box::new(parse_node(raw, &child(pointer, keyword::CONTAINS), depth)?)),
        None => None,
    };
    Ok(ArrayConstraints {
        items,
        contains,
        min_items: count(map, keyword::MIN_ITEMS, pointer)?,
        max_items: count(map, keyword::MAX_ITEMS, pointer)?,
    })
}

fn parse_string(map: &Map<String, Value>, pointer: &str) -> Result<StringConstraints, SchemaError> {
    let format = match map.get(keyword::FORMAT) {
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => return Err(invalid(&child(pointer, keyword::FORMAT), "expected a format name string")),
        None => None,
    };
    Ok(StringConstraints {
        min_length: count(map, keyword::MIN_LENGTH, pointer)?,
        max_length: count(map, keyword::MAX_LENGTH, pointer)?,
        format,
    })
}

fn count(map: &Map<String, Value>, key: &str, pointer: &str) -> Result<Option<u64>, SchemaError> {
    match map.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .as_u64()
            .map(Some)
            .ok_or_else(|| invalid(&child(pointer, key), "expected a non-negative integer")),
    }
}

fn number(map: &Map<String, Value>, key: &str, pointer: &str) -> Result<Option<Number>, SchemaError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(_) => Err(invalid(&child(pointer, key), "expected a number")),
    }
}

fn branches(
    map: &Map<String, Value>,
    key: &str,
    pointer: &str,
    depth: Depth,
) -> Result<Vec<SchemaNode>, SchemaError> {
    let Some(raw) = map.get(key) else {
        return Ok(Vec::new());
    };
    let branch_pointer = child(pointer, key);
    match raw {
        Value::Array(nodes) if !nodes.is_empty() => nodes
            .iter()
            .enumerate()
            .map(|(i, node)| parse_node(node, &child(&branch_pointer, &i.to_string()), depth))
            .collect(),
        _ => Err(invalid(&branch_pointer, "expected a non-empty array of schemas")),
    }
}

fn expect_object<'a>(value: &'a Value, pointer: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| invalid(pointer, "expected a schema object"))
}

fn invalid(pointer: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidKeyword {
        pointer: pointer.to_string(),
        reason: reason.to_string(),
    }
}

/// Append one escaped reference token to a JSON Pointer.
fn child(pointer: &str, token: &str) -> String {
    format!("{pointer}/{}", token.replace('~', "~0").replace('/', "~1"))
}
