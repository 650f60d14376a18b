//! Schema generation facade.
//!
//! [`SchemaGenerator`] wires the pipeline together for a caller that knows
//! an entity by name: fetch root descriptors, expand relationships, and
//! hand the result to the synthesizer or group assigner. Every public
//! entry point is one generation pass: the fetch cache is created fresh,
//! threaded through the pass, and discarded — no state survives between
//! calls, and concurrent passes cannot interfere.

pub mod classifier;
pub mod groups;
pub mod synthesizer;
pub mod traversal;
pub mod typemap;

pub use classifier::GeneratorOptions;
pub use groups::{assign_default_groups, FieldConfig, GeneratedGroup};
pub use synthesizer::{synthesize, DataSchema, GeneratedSchemaPair, UiSchema};
pub use traversal::{expand, ExpandedField, ExpandedKind, FetchCache};
pub use typemap::{FieldSchema, SchemaFormat, SchemaType, UiHints};

use crate::error::MetaGridResult;
use crate::metadata::registry::DescriptorSource;
use crate::metadata::types::{FieldDescriptor, MetadataError};
use log::info;
use uuid::Uuid;

/// Generation entry points over a descriptor source.
pub struct SchemaGenerator<'a> {
    source: &'a dyn DescriptorSource,
}

impl<'a> SchemaGenerator<'a> {
    #[must_use]
    pub fn new(source: &'a dyn DescriptorSource) -> Self {
        Self { source }
    }

    /// Generate the form schema pair for an entity.
    ///
    /// Forms are flat: the root entity's own descriptors feed the
    /// synthesizer directly, and reference fields become lookup enums. A
    /// caller that wants expanded input can compose [`expand`] with
    /// [`synthesize`] itself.
    pub fn generate_form_schema(
        &self,
        entity: &str,
        options: &GeneratorOptions,
    ) -> MetaGridResult<GeneratedSchemaPair> {
        let pass = Uuid::new_v4();
        info!("Generation pass {pass}: form schema for '{entity}'");

        let fields = self.root_fields(entity)?;
        let title_entity = if options.entity_name.is_empty() {
            entity
        } else {
            options.entity_name.as_str()
        };
        let pair = synthesizer::synthesize(title_entity, &fields, options);

        info!(
            "Generation pass {pass} complete: {} properties, {} required",
            pair.data_schema.properties.len(),
            pair.data_schema.required.len()
        );
        Ok(pair)
    }

    /// Expand an entity's relationship graph into a flattened field list.
    pub fn expand_entity(&self, entity: &str) -> MetaGridResult<Vec<ExpandedField>> {
        let pass = Uuid::new_v4();
        info!("Generation pass {pass}: expanding '{entity}'");

        let fields = self.root_fields(entity)?;
        let mut cache = FetchCache::new();
        let expanded = traversal::expand_with_cache(&fields, self.source, &mut cache)?;

        info!(
            "Generation pass {pass} complete: {} fields from {} source calls",
            expanded.len(),
            cache.source_calls()
        );
        Ok(expanded)
    }

    /// Generate the default detail-view groups for an entity.
    pub fn generate_default_groups(&self, entity: &str) -> MetaGridResult<Vec<GeneratedGroup>> {
        let expanded = self.expand_entity(entity)?;
        Ok(groups::assign_default_groups(&expanded))
    }

    /// Root descriptors for the entity generation starts from. Related
    /// entities may be missing (their references degrade to leaf fields);
    /// a missing root entity is a caller error.
    fn root_fields(&self, entity: &str) -> MetaGridResult<Vec<FieldDescriptor>> {
        match self.source.descriptors_for(entity)? {
            Some(fields) => Ok(fields),
            None => Err(MetadataError::EntityNotFound(entity.to_string()).into()),
        }
    }
}
