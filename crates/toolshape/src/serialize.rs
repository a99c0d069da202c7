use serde_json::{Map, Value};

use crate::schema::Schema;

impl Schema {
    /// Render as an ordered JSON-Schema map.
    ///
    /// With `strict` set, every object property is listed as required and
    /// `additionalProperties` is pinned to `false`, as structured-output
    /// APIs demand. The flag propagates unchanged through nested
    /// properties, array items, alternatives, and `$defs`. Key order is
    /// part of the output contract and is preserved exactly.
    pub fn to_map(&self, strict: bool) -> Map<String, Value> {
        match self {
            Schema::Object {
                properties,
                required,
                description,
                definitions,
            } => {
                let mut map = Map::new();
                map.insert("type".to_string(), "object".into());
                if let Some(description) = description {
                    map.insert("description".to_string(), description.as_str().into());
                }
                map.insert(
                    "properties".to_string(),
                    render_entries(properties.iter(), strict),
                );
                if strict {
                    // Structured outputs reject schemas with optional
                    // fields; the original required list is overridden.
                    let all: Vec<Value> =
                        properties.keys().map(|name| name.as_str().into()).collect();
                    map.insert("required".to_string(), Value::Array(all));
                    map.insert("additionalProperties".to_string(), Value::Bool(false));
                } else if let Some(required) = required {
                    let names: Vec<Value> =
                        required.iter().map(|name| name.as_str().into()).collect();
                    map.insert("required".to_string(), Value::Array(names));
                }
                if let Some(definitions) = definitions {
                    map.insert(
                        "$defs".to_string(),
                        render_entries(definitions.iter(), strict),
                    );
                }
                map
            }
            Schema::Array { items, description } => {
                let mut map = Map::new();
                map.insert("type".to_string(), "array".into());
                if let Some(description) = description {
                    map.insert("description".to_string(), description.as_str().into());
                }
                map.insert("items".to_string(), Value::Object(items.to_map(strict)));
                map
            }
            Schema::Enum {
                values,
                description,
            } => {
                let mut map = Map::new();
                map.insert("type".to_string(), "string".into());
                if let Some(description) = description {
                    map.insert("description".to_string(), description.as_str().into());
                }
                let values: Vec<Value> = values.iter().map(|v| v.as_str().into()).collect();
                map.insert("enum".to_string(), Value::Array(values));
                map
            }
            Schema::String { description } => primitive("string", description),
            Schema::Integer { description } => primitive("integer", description),
            Schema::Number { description } => primitive("number", description),
            Schema::Boolean { description } => primitive("boolean", description),
            Schema::Reference { reference } => {
                let mut map = Map::new();
                if let Some(reference) = reference {
                    map.insert("$ref".to_string(), format!("#/$defs/{reference}").into());
                }
                map
            }
            Schema::AnyOf {
                alternatives,
                description,
            } => {
                let mut map = Map::new();
                if let Some(description) = description {
                    map.insert("description".to_string(), description.as_str().into());
                }
                let alternatives: Vec<Value> = alternatives
                    .iter()
                    .map(|alt| Value::Object(alt.to_map(strict)))
                    .collect();
                map.insert("anyOf".to_string(), Value::Array(alternatives));
                map
            }
            // Pre-rendered maps bypass strict handling entirely.
            Schema::Custom { map } => map.clone(),
        }
    }

    /// [`Schema::to_map`] wrapped in a [`Value`].
    pub fn to_value(&self, strict: bool) -> Value {
        Value::Object(self.to_map(strict))
    }
}

fn primitive(kind: &str, description: &Option<String>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".to_string(), kind.into());
    if let Some(description) = description {
        map.insert("description".to_string(), description.as_str().into());
    }
    map
}

fn render_entries<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Schema)>,
    strict: bool,
) -> Value {
    let map: Map<String, Value> = entries
        .map(|(name, schema)| (name.clone(), Value::Object(schema.to_map(strict))))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn person() -> Schema {
        Schema::Object {
            properties: IndexMap::from([
                (
                    "name".to_string(),
                    Schema::String {
                        description: Some("Full name".to_string()),
                    },
                ),
                ("age".to_string(), Schema::Integer { description: None }),
            ]),
            required: Some(vec!["name".to_string()]),
            description: None,
            definitions: None,
        }
    }

    #[test]
    fn strict_mode_requires_every_property_and_seals_the_object() {
        assert_eq!(
            person().to_value(true),
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Full name"},
                    "age": {"type": "integer"},
                },
                "required": ["name", "age"],
                "additionalProperties": false,
            })
        );
    }

    #[test]
    fn non_strict_mode_preserves_the_original_required_list() {
        let value = person().to_value(false);
        assert_eq!(value["required"], json!(["name"]));
        assert_eq!(value.get("additionalProperties"), None);
    }

    #[test]
    fn key_order_is_reproducible() {
        let rendered = serde_json::to_string(&person().to_value(true)).unwrap();
        assert_eq!(
            rendered,
            r#"{"type":"object","properties":{"name":{"type":"string","description":"Full name"},"age":{"type":"integer"}},"required":["name","age"],"additionalProperties":false}"#
        );
    }

    #[test]
    fn enums_render_as_string_schemas() {
        let schema = Schema::Enum {
            values: vec!["RED".to_string(), "GREEN".to_string(), "BLUE".to_string()],
            description: None,
        };
        assert_eq!(
            schema.to_value(false),
            json!({"type": "string", "enum": ["RED", "GREEN", "BLUE"]})
        );
    }

    #[test]
    fn strict_flag_reaches_nested_definitions() {
        let schema = Schema::Object {
            properties: IndexMap::from([(
                "next".to_string(),
                Schema::Reference {
                    reference: Some("abc123".to_string()),
                },
            )]),
            required: Some(vec!["next".to_string()]),
            description: None,
            definitions: Some(IndexMap::from([("abc123".to_string(), person())])),
        };

        let value = schema.to_value(true);
        assert_eq!(value["properties"]["next"]["$ref"], json!("#/$defs/abc123"));
        assert_eq!(value["$defs"]["abc123"]["required"], json!(["name", "age"]));
        assert_eq!(
            value["$defs"]["abc123"]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn anonymous_references_render_empty() {
        let schema = Schema::Reference { reference: None };
        assert_eq!(schema.to_value(false), json!({}));
    }

    #[test]
    fn any_of_renders_each_alternative() {
        let schema = Schema::AnyOf {
            alternatives: vec![
                Schema::String { description: None },
                Schema::Integer { description: None },
            ],
            description: Some("String or integer".to_string()),
        };
        assert_eq!(
            schema.to_value(false),
            json!({
                "description": "String or integer",
                "anyOf": [{"type": "string"}, {"type": "integer"}],
            })
        );
    }

    #[test]
    fn custom_schemas_bypass_strict_handling() {
        let mut raw = serde_json::Map::new();
        raw.insert("type".to_string(), "object".into());
        raw.insert("x-vendor".to_string(), json!({"opaque": true}));
        let schema = Schema::Custom { map: raw.clone() };

        assert_eq!(schema.to_map(true), raw);
        assert_eq!(schema.to_map(false), raw);
    }
}
