use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::describe::{CustomShape, Describe, Shape};
use crate::error::Error;
use crate::schema::Schema;

/// Recursion limit for non-cyclic nesting. Reference cycles are broken by
/// the ledger, so only pathologically deep generic structures can hit it.
const MAX_DEPTH: usize = 64;

/// Hex length of a reference id.
const REFERENCE_LEN: usize = 16;

/// Build the schema for a [`Describe`] type, collecting `$defs` entries
/// for any definitions involved in a reference cycle.
pub fn schema_for<T: Describe>() -> Result<Schema, Error> {
    SchemaBuilder::new().build(&T::shape())
}

/// Compiles a [`Shape`] into a [`Schema`] tree.
///
/// The builder owns the visitation ledger for one walk. [`build`] consumes
/// the builder, so a ledger can never be shared between two walks.
///
/// [`build`]: SchemaBuilder::build
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    ledger: IndexMap<&'static str, Visited>,
    depth: usize,
}

/// Ledger entry for one custom type: created on first sight, before its
/// fields are walked.
#[derive(Debug)]
struct Visited {
    /// The reference placeholder at first, replaced by the finished object
    /// once all fields are built. A clone of whatever is stored here is
    /// handed to later occurrences of the type.
    element: Schema,
    reference: String,
    recursion_detected: bool,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `shape`. When the root is a custom type, definitions for
    /// every cycle detected during the walk are attached to it as `$defs`.
    pub fn build(mut self, shape: &Shape) -> Result<Schema, Error> {
        match shape {
            Shape::Custom(custom) => self.object_or_reference(custom, None, true),
            _ => self.element_from(shape, None, None),
        }
    }

    fn element_from(
        &mut self,
        shape: &Shape,
        field: Option<&str>,
        field_description: Option<&str>,
    ) -> Result<Schema, Error> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::DepthLimitExceeded { limit: MAX_DEPTH });
        }
        let element = self.classify(shape, field, field_description)?;
        self.depth -= 1;
        Ok(element)
    }

    // First match wins: primitives, then enums, then the two array
    // flavors; anything left is a composite.
    fn classify(
        &mut self,
        shape: &Shape,
        field: Option<&str>,
        field_description: Option<&str>,
    ) -> Result<Schema, Error> {
        match shape {
            Shape::String { description } => Ok(Schema::String {
                description: field_description
                    .map(str::to_owned)
                    .or_else(|| description.clone()),
            }),
            Shape::Integer => Ok(Schema::Integer {
                description: field_description.map(str::to_owned),
            }),
            Shape::Number => Ok(Schema::Number {
                description: field_description.map(str::to_owned),
            }),
            Shape::Boolean => Ok(Schema::Boolean {
                description: field_description.map(str::to_owned),
            }),
            Shape::Enum {
                values,
                description,
            } => Ok(Schema::Enum {
                values: values.clone(),
                description: field_description
                    .map(str::to_owned)
                    .or_else(|| description.clone()),
            }),
            // Element schemas are built from the raw element shape alone;
            // the field description stays with the array itself. The field
            // name is carried through so errors can name the nearest
            // enclosing field.
            Shape::FixedArray { element } => Ok(Schema::Array {
                items: Box::new(self.element_from(element, field, None)?),
                description: field_description.map(str::to_owned),
            }),
            Shape::Collection { element } => {
                let Some(element) = element else {
                    return Err(Error::UnresolvableElementType {
                        field: field.unwrap_or("<root>").to_string(),
                    });
                };
                Ok(Schema::Array {
                    items: Box::new(self.element_from(element, field, None)?),
                    description: field_description.map(str::to_owned),
                })
            }
            Shape::Custom(custom) => self.object_or_reference(custom, field_description, false),
        }
    }

    fn object_or_reference(
        &mut self,
        custom: &CustomShape,
        description: Option<&str>,
        emit_definitions: bool,
    ) -> Result<Schema, Error> {
        if let Some(entry) = self.ledger.get_mut(custom.name) {
            // Re-encountering a type whose entry is still the placeholder
            // means the walk came back around to it: a genuine cycle.
            if matches!(entry.element, Schema::Reference { .. }) {
                entry.recursion_detected = true;
            }
            return Ok(entry.element.clone());
        }

        // Pre-register before walking fields, so a field referring back to
        // this type resolves to the placeholder instead of looping.
        let reference = reference_id(custom.name);
        self.ledger.insert(
            custom.name,
            Visited {
                element: Schema::Reference {
                    reference: Some(reference.clone()),
                },
                reference,
                recursion_detected: false,
            },
        );

        let mut properties = IndexMap::new();
        for field in (custom.fields)() {
            let element = self.element_from(&field.shape, Some(field.name), field.description)?;
            properties.insert(field.name.to_string(), element);
        }

        // All declared fields are required at this layer; optionality is
        // not a concept the type walk knows about.
        let required = properties.keys().cloned().collect();
        let mut object = Schema::Object {
            properties,
            required: Some(required),
            description: description
                .map(str::to_owned)
                .or_else(|| custom.description.map(str::to_owned)),
            definitions: None,
        };

        if let Some(entry) = self.ledger.get_mut(custom.name) {
            entry.element = object.clone();
        }

        if emit_definitions {
            let definitions: IndexMap<String, Schema> = self
                .ledger
                .values()
                .filter(|entry| entry.recursion_detected)
                .map(|entry| (entry.reference.clone(), entry.element.clone()))
                .collect();
            if !definitions.is_empty() {
                if let Schema::Object {
                    definitions: slot, ..
                } = &mut object
                {
                    *slot = Some(definitions);
                }
            }
        }

        Ok(object)
    }
}

/// Stable reference id for a fully-qualified type name: the SHA-256 of
/// the name, hex-rendered and truncated. Repeated builds of the same type
/// must agree on the id; the exact mapping is otherwise arbitrary.
fn reference_id(name: &str) -> String {
    Sha256::digest(name.as_bytes())
        .iter()
        .take(REFERENCE_LEN / 2)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
