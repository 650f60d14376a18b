//! Boundary normalization for descriptors entering the engine.
//!
//! Descriptors arrive loosely shaped. Normalization runs where they enter
//! the registry so internal logic can assume a fully defaulted shape: a
//! descriptor with no key is dropped (logged, never fatal — a single bad
//! descriptor must not prevent the rest of an entity's schema from being
//! produced), duplicate keys keep the first occurrence, and missing
//! display names are derived from the key.

use crate::metadata::types::{EntityMetadata, FieldDescriptor, MetadataError};
use log::warn;
use serde_json::Value;
use std::collections::HashSet;

/// Normalize a descriptor list: drop key-less entries, dedupe keys, fill
/// derived display names.
pub fn normalize_descriptors(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut normalized = Vec::with_capacity(fields.len());

    for mut field in fields {
        if field.key.is_empty() {
            warn!("Dropping descriptor with missing key");
            continue;
        }
        if !seen.insert(field.key.clone()) {
            warn!("Dropping duplicate descriptor for key '{}'", field.key);
            continue;
        }
        if field.storage_type.is_empty() {
            field.storage_type = "text".to_string();
        }
        if field.display_name.is_none() {
            field.display_name = Some(field.label());
        }
        normalized.push(field);
    }

    normalized
}

/// Parse an entity document from raw JSON, skipping malformed field
/// entries instead of rejecting the whole document.
pub fn parse_entity_document(value: Value) -> Result<EntityMetadata, MetadataError> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| MetadataError::invalid_data("entity document has no name"))?
        .to_string();

    let display_name = value
        .get("display_name")
        .and_then(Value::as_str)
        .map(String::from);

    let mut fields = Vec::new();
    if let Some(raw_fields) = value.get("fields").and_then(Value::as_array) {
        for (index, raw) in raw_fields.iter().enumerate() {
            match serde_json::from_value::<FieldDescriptor>(raw.clone()) {
                Ok(field) => fields.push(field),
                Err(e) => {
                    let err = MetadataError::MalformedDescriptor(format!(
                        "index {index} in entity '{name}': {e}"
                    ));
                    warn!("Skipping descriptor: {err}");
                }
            }
        }
    }

    let mut entity = EntityMetadata::new(name);
    entity.display_name = display_name;
    entity.fields = normalize_descriptors(fields);
    Ok(entity)
}
