pub mod descriptor;
pub mod entity;
pub mod errors;

pub use descriptor::{FieldDescriptor, ForeignKeyRef, SemanticRole, SemanticType};
pub use entity::EntityMetadata;
pub use errors::MetadataError;
