use std::collections::{BTreeSet, HashSet, VecDeque};

/// Description a string schema gets when it stands for a UUID value.
pub const DEFAULT_UUID_DESCRIPTION: &str = "String in a UUID format";

/// Runtime description of a type's structure — the input to
/// [`SchemaBuilder`](crate::SchemaBuilder).
///
/// This is the crate's replacement for reflection: instead of
/// introspecting field layouts at runtime, every type states its own
/// structure as a `Shape`, either through [`Describe`] or by constructing
/// one directly (e.g. from an external type registry).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// String-like value; `description` is the type-level description used
    /// when no field-level one is given.
    String { description: Option<String> },
    Integer,
    Number,
    Boolean,
    /// Enumerated value; `values` in declaration order.
    Enum {
        values: Vec<String>,
        description: Option<String>,
    },
    /// Fixed-size array (`[T; N]`-like).
    FixedArray { element: Box<Shape> },
    /// Variable-size collection (`Vec`, sets, deques). `element: None`
    /// marks an unresolvable element type; the builder fails fast on it.
    Collection { element: Option<Box<Shape>> },
    /// A user-defined composite type, decomposed field by field.
    Custom(CustomShape),
}

impl Shape {
    /// String shape carrying the fixed UUID description.
    pub fn uuid() -> Self {
        Shape::String {
            description: Some(DEFAULT_UUID_DESCRIPTION.to_string()),
        }
    }
}

/// Descriptor for a user-defined composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomShape {
    /// Fully-qualified type name. This is the type's identity for cycle
    /// detection and the seed for its stable `$defs` reference id.
    pub name: &'static str,
    /// Type-level description, used when a field referencing this type
    /// carries none of its own.
    pub description: Option<&'static str>,
    /// Field triples in declaration order. Deferred behind a fn pointer so
    /// that descriptors of self-referential types terminate.
    pub fields: fn() -> Vec<Field>,
}

impl CustomShape {
    pub fn new(name: &'static str, fields: fn() -> Vec<Field>) -> Self {
        Self {
            name,
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// One `(name, shape, description)` triple of a composite type's declared
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub shape: Shape,
}

impl Field {
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            description: None,
            shape,
        }
    }

    pub fn described(name: &'static str, description: &'static str, shape: Shape) -> Self {
        Self {
            name,
            description: Some(description),
            shape,
        }
    }
}

/// Trait for types that can describe their own [`Shape`].
///
/// This is the Rust analog of zod's `.describe()` — it produces a shape
/// descriptor that the schema builder compiles into the JSON Schema a
/// language model uses to understand the expected input.
///
/// Implement this manually for now; a derive macro will be added later.
///
/// # Example
///
/// ```
/// use toolshape::{CustomShape, Describe, Field, Shape};
///
/// struct ReadFileInput {
///     path: String,
///     line_limit: u32,
/// }
///
/// impl Describe for ReadFileInput {
///     fn shape() -> Shape {
///         Shape::Custom(
///             CustomShape::new("docs::ReadFileInput", || {
///                 vec![
///                     Field::described("path", "File path to read", String::shape()),
///                     Field::described("line_limit", "Maximum number of lines", u32::shape()),
///                 ]
///             })
///             .with_description("Read a file from disk"),
///         )
///     }
/// }
/// ```
pub trait Describe {
    /// Return a [`Shape`] describing this type's structure.
    fn shape() -> Shape;
}

// ---------------------------------------------------------------------------
// Built-in impls for common types
// ---------------------------------------------------------------------------

impl Describe for String {
    fn shape() -> Shape {
        Shape::String { description: None }
    }
}

impl Describe for bool {
    fn shape() -> Shape {
        Shape::Boolean
    }
}

impl Describe for f64 {
    fn shape() -> Shape {
        Shape::Number
    }
}

impl Describe for f32 {
    fn shape() -> Shape {
        Shape::Number
    }
}

impl Describe for i64 {
    fn shape() -> Shape {
        Shape::Integer
    }
}

impl Describe for i32 {
    fn shape() -> Shape {
        Shape::Integer
    }
}

impl Describe for u64 {
    fn shape() -> Shape {
        Shape::Integer
    }
}

impl Describe for u32 {
    fn shape() -> Shape {
        Shape::Integer
    }
}

impl Describe for usize {
    fn shape() -> Shape {
        Shape::Integer
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::Collection {
            element: Some(Box::new(T::shape())),
        }
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Collection {
            element: Some(Box::new(T::shape())),
        }
    }
}

impl<T: Describe> Describe for HashSet<T> {
    fn shape() -> Shape {
        Shape::Collection {
            element: Some(Box::new(T::shape())),
        }
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Collection {
            element: Some(Box::new(T::shape())),
        }
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape() -> Shape {
        Shape::FixedArray {
            element: Box::new(T::shape()),
        }
    }
}

impl<T: Describe> Describe for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}
