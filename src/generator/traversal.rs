//! Recursive foreign-key expansion over entity metadata.
//!
//! Expansion walks every field that references another entity, pulls the
//! related entity's descriptors through the caller's [`DescriptorSource`],
//! and emits a flattened, key-prefixed field list. Cycles are a designed
//! termination condition: a path that would revisit an ancestor entity
//! emits the raw reference field and stops. The visited set is per path —
//! two sibling branches may each expand the same related entity
//! independently.

use crate::metadata::registry::DescriptorSource;
use crate::metadata::types::{FieldDescriptor, MetadataError};
use crate::metadata::types::descriptor::derive_label;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Kind of an expanded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandedKind {
    /// A concrete field, renderable as-is
    Leaf,
    /// Synthetic object field standing in for an expanded relationship
    Relation,
}

/// A descriptor produced by expansion, with the path that led to it.
#[derive(Debug, Clone, Serialize)]
pub struct ExpandedField {
    pub descriptor: FieldDescriptor,
    /// Entity identifiers visited to reach this field; empty for fields on
    /// the root entity. Never contains the same entity twice.
    pub origin_path: Vec<String>,
    pub depth: usize,
    pub kind: ExpandedKind,
}

impl ExpandedField {
    fn new(descriptor: FieldDescriptor, origin_path: Vec<String>, kind: ExpandedKind) -> Self {
        let depth = origin_path.len();
        Self {
            descriptor,
            origin_path,
            depth,
            kind,
        }
    }
}

/// Per-pass memoization of descriptor-source lookups.
///
/// Created fresh for each top-level expansion and discarded afterward, so
/// concurrent generation passes cannot interfere. Misses are cached too —
/// an unresolvable entity costs one round-trip per pass, not one per
/// referencing field.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: HashMap<String, Option<Vec<FieldDescriptor>>>,
    source_calls: usize,
}

impl FetchCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls actually issued to the descriptor source.
    pub fn source_calls(&self) -> usize {
        self.source_calls
    }

    fn fetch(
        &mut self,
        source: &dyn DescriptorSource,
        entity: &str,
    ) -> Result<Option<Vec<FieldDescriptor>>, MetadataError> {
        if let Some(cached) = self.entries.get(entity) {
            return Ok(cached.clone());
        }
        self.source_calls += 1;
        let result = source.descriptors_for(entity)?;
        if result.is_none() {
            warn!("No metadata available for entity '{entity}'; references to it stay leaf fields");
        }
        self.entries.insert(entity.to_string(), result.clone());
        Ok(result)
    }
}

/// Expand a root descriptor list, following foreign keys recursively.
pub fn expand(
    fields: &[FieldDescriptor],
    source: &dyn DescriptorSource,
) -> Result<Vec<ExpandedField>, MetadataError> {
    let mut cache = FetchCache::new();
    expand_with_cache(fields, source, &mut cache)
}

/// Expansion entry point with a caller-owned fetch cache, for callers that
/// drive several expansions in one generation pass.
pub fn expand_with_cache(
    fields: &[FieldDescriptor],
    source: &dyn DescriptorSource,
    cache: &mut FetchCache,
) -> Result<Vec<ExpandedField>, MetadataError> {
    expand_inner(fields, source, cache, "", &HashSet::new(), &[])
}

fn expand_inner(
    fields: &[FieldDescriptor],
    source: &dyn DescriptorSource,
    cache: &mut FetchCache,
    prefix: &str,
    visited: &HashSet<String>,
    origin_path: &[String],
) -> Result<Vec<ExpandedField>, MetadataError> {
    let mut expanded = Vec::new();

    for field in fields {
        if field.key.is_empty() {
            warn!("Skipping descriptor with missing key during expansion");
            continue;
        }

        let current_key = join_key(prefix, &field.key);

        if let Some(foreign_key) = &field.foreign_key {
            if let Some(related) = cache.fetch(source, &foreign_key.source_entity)? {
                if visited.contains(&foreign_key.source_entity) {
                    debug!(
                        "Cycle on '{}' via '{current_key}'; emitting reference field",
                        foreign_key.source_entity
                    );
                    expanded.push(make_leaf(field, &current_key, prefix, origin_path));
                    continue;
                }

                let object_key = join_key(prefix, trim_reference_suffix(&field.key));
                let mut object = FieldDescriptor::new(object_key.clone(), "jsonb");
                object.display_name = Some(derive_label(&object_key));
                object.is_virtual = true;

                let mut child_origin = origin_path.to_vec();
                child_origin.push(foreign_key.source_entity.clone());
                expanded.push(ExpandedField::new(
                    object,
                    child_origin.clone(),
                    ExpandedKind::Relation,
                ));

                let mut child_visited = visited.clone();
                child_visited.insert(foreign_key.source_entity.clone());

                let children = expand_inner(
                    &related,
                    source,
                    cache,
                    &object_key,
                    &child_visited,
                    &child_origin,
                )?;
                expanded.extend(children);
                continue;
            }
        }

        expanded.push(make_leaf(field, &current_key, prefix, origin_path));
    }

    Ok(expanded)
}

fn make_leaf(
    field: &FieldDescriptor,
    current_key: &str,
    prefix: &str,
    origin_path: &[String],
) -> ExpandedField {
    let mut descriptor = field.clone();
    let label = if prefix.is_empty() {
        field.label()
    } else {
        format!("{} {}", derive_label(prefix), field.label())
    };
    descriptor.key = current_key.to_string();
    descriptor.display_name = Some(label);
    ExpandedField::new(descriptor, origin_path.to_vec(), ExpandedKind::Leaf)
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Strip the reference suffix from a foreign-key field name:
/// `parent_account_id` becomes `parent_account`.
fn trim_reference_suffix(key: &str) -> &str {
    key.strip_suffix("_id")
        .or_else(|| key.strip_suffix("_uuid"))
        .unwrap_or(key)
}
