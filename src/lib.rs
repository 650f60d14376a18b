//! MetaGrid — metadata-driven schema generation for the platform console.
//!
//! The engine takes a flat, declarative description of an entity's fields
//! (storage type, foreign-key reference, display flags) and synthesizes
//! the artifacts the console renders from:
//!
//! - a data-schema / UI-schema pair for dynamic data-entry forms
//! - a grouped field structure for detail and overview views
//!
//! Foreign-key relationships are followed recursively into other entities'
//! metadata, with per-path cycle breaking so cyclic relationship graphs
//! (A → B → A, self-references) always terminate.

pub mod config;
pub mod error;
pub mod generator;
pub mod metadata;

pub use config::MetaGridConfig;
pub use error::{MetaGridError, MetaGridResult};
pub use generator::classifier::GeneratorOptions;
pub use generator::groups::{FieldConfig, GeneratedGroup};
pub use generator::synthesizer::{DataSchema, GeneratedSchemaPair, UiSchema};
pub use generator::traversal::{ExpandedField, ExpandedKind};
pub use generator::SchemaGenerator;
pub use metadata::registry::{DescriptorSource, MetadataLoadReport, MetadataRegistry};
pub use metadata::types::{
    EntityMetadata, FieldDescriptor, ForeignKeyRef, MetadataError, SemanticRole, SemanticType,
};
