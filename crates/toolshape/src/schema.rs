use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A JSON-Schema-like description of a value's shape.
///
/// Produced by [`SchemaBuilder`](crate::SchemaBuilder) from a
/// [`Shape`](crate::Shape), or constructed directly; rendered with
/// [`Schema::to_map`](crate::Schema::to_map). Values are immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String {
        description: Option<String>,
    },
    Integer {
        description: Option<String>,
    },
    Number {
        description: Option<String>,
    },
    Boolean {
        description: Option<String>,
    },
    Enum {
        values: Vec<String>,
        description: Option<String>,
    },
    Array {
        items: Box<Schema>,
        description: Option<String>,
    },
    Object {
        properties: IndexMap<String, Schema>,
        required: Option<Vec<String>>,
        description: Option<String>,
        /// Definitions for types involved in reference cycles, keyed by
        /// their reference id. Only ever set on the root object.
        definitions: Option<IndexMap<String, Schema>>,
    },
    /// Placeholder for an object type defined (or still being defined)
    /// elsewhere in the tree, resolved through `$defs`.
    Reference {
        reference: Option<String>,
    },
    /// One of several alternative schemas. The builder never emits this;
    /// it exists for programmatic construction.
    AnyOf {
        alternatives: Vec<Schema>,
        description: Option<String>,
    },
    /// Escape hatch: a pre-rendered schema map emitted verbatim.
    Custom {
        map: serde_json::Map<String, Value>,
    },
}

/// Serializes as the non-strict JSON Schema rendering.
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value(false).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn serde_serialization_matches_the_non_strict_rendering() {
        let schema = Schema::Object {
            properties: IndexMap::from([(
                "name".to_string(),
                Schema::String { description: None },
            )]),
            required: Some(vec!["name".to_string()]),
            description: Some("A named thing".to_string()),
            definitions: None,
        };

        let direct = serde_json::to_value(&schema).unwrap();
        assert_eq!(direct, schema.to_value(false));
    }
}
