pub mod schema;
pub mod value;

// Re-export commonly used items
pub use schema::{FieldDef, Filterable, Schema, SchemaBuilder};
pub use value::{EnumMember, FieldValue, FilterValue, ValueKind};
