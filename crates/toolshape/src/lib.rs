pub mod builder;
pub mod describe;
pub mod error;
pub mod schema;
pub mod serialize;

pub use builder::{SchemaBuilder, schema_for};
pub use describe::{CustomShape, Describe, Field, Shape};
pub use error::Error;
pub use schema::Schema;
