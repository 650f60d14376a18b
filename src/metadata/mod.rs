pub mod registry;
pub mod types;
pub mod validate;

pub use registry::{DescriptorSource, MetadataRegistry};

// Re-export all types at the metadata module level
pub use types::{
    EntityMetadata,
    FieldDescriptor,
    ForeignKeyRef,
    MetadataError,
    SemanticRole,
    SemanticType,
};
