//! # Field Paths — Traversal Context
//!
//! `FieldPath` is the trail of object keys and array indices from the
//! document root to the value under evaluation. The evaluator pushes a
//! segment before descending and pops it on the way back up, so a single
//! path buffer serves a whole validation call.
//!
//! Paths display as RFC 6901 JSON Pointers (`/details/first_name`,
//! `/ids/0`). Validation messages only ever name the leaf segment.

use serde::{Serialize, Serializer};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member.
    Key(String),
    /// An array element.
    Index(usize),
}

impl PathSegment {
    /// Whether this step addresses an array element.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Label used in messages: `field 'name'` or `index '3'`.
    pub fn label(&self) -> String {
        match self {
            Self::Key(key) => format!("field '{key}'"),
            Self::Index(i) => format!("index '{i}'"),
        }
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Location of a value inside a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this path is the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, or `None` at the root.
    pub fn leaf(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// All segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Descend into an object member.
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    /// Descend into an array element.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Step back up one level.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Render as an RFC 6901 JSON Pointer. The root is the empty string.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                PathSegment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_pointer())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_pointer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.leaf().is_none());
        assert_eq!(path.to_pointer(), "");
    }

    #[test]
    fn test_push_and_pop() {
        let mut path = FieldPath::root();
        path.push_key("ids");
        path.push_index(2);
        assert_eq!(path.to_pointer(), "/ids/2");
        assert_eq!(path.leaf(), Some(&PathSegment::Index(2)));
        assert_eq!(path.pop(), Some(PathSegment::Index(2)));
        assert_eq!(path.leaf(), Some(&PathSegment::Key("ids".into())));
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn test_pointer_escaping() {
        let mut path = FieldPath::root();
        path.push_key("a/b");
        path.push_key("m~n");
        assert_eq!(path.to_string(), "/a~1b/m~0n");
    }

    #[test]
    fn test_segment_labels() {
        assert_eq!(PathSegment::Key("details".into()).label(), "field 'details'");
        assert_eq!(PathSegment::Index(0).label(), "index '0'");
        assert!(PathSegment::Index(0).is_index());
    }

    #[test]
    fn test_serializes_as_pointer() {
        let mut path = FieldPath::root();
        path.push_key("details");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/details\"");
    }
}
