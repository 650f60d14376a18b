//! Default field grouping for detail and overview views.
//!
//! Expanded fields partition into a "Primary Details" group (root-entity
//! fields) followed by one group per top-level expanded relationship, in
//! the order those relationships were first encountered. Synthetic
//! relation markers name and order the groups but are not members; empty
//! groups are omitted.

use crate::generator::traversal::{ExpandedField, ExpandedKind};
use crate::metadata::types::descriptor::derive_label;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PRIMARY_GROUP_NAME: &str = "Primary Details";

/// One field placement inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field_path: String,
    pub label: String,
    pub order: u32,
}

/// A named, ordered group of fields for detail rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedGroup {
    pub name: String,
    pub fields: Vec<FieldConfig>,
    pub order: u32,
}

/// Partition expanded fields into default groups.
pub fn assign_default_groups(expanded: &[ExpandedField]) -> Vec<GeneratedGroup> {
    let mut primary: Vec<FieldConfig> = Vec::new();
    // Top-level relationships in first-encounter order: (hop key, display name)
    let mut relations: Vec<(String, String)> = Vec::new();
    let mut members: HashMap<String, Vec<FieldConfig>> = HashMap::new();

    for field in expanded {
        match field.kind {
            ExpandedKind::Relation => {
                // Only top-level markers open groups; nested ones are
                // rendered inside their ancestor's group.
                if field.depth == 1 && !relations.iter().any(|(key, _)| key == &field.descriptor.key)
                {
                    relations.push((field.descriptor.key.clone(), field.descriptor.label()));
                }
            }
            ExpandedKind::Leaf => {
                let bucket = if field.origin_path.is_empty() {
                    &mut primary
                } else {
                    let hop = field
                        .descriptor
                        .key
                        .split('.')
                        .next()
                        .unwrap_or(&field.descriptor.key)
                        .to_string();
                    members.entry(hop).or_default()
                };
                let order = bucket.len() as u32 + 1;
                bucket.push(FieldConfig {
                    field_path: field.descriptor.key.clone(),
                    label: field.descriptor.label(),
                    order,
                });
            }
        }
    }

    let mut groups = Vec::new();
    let mut next_order = 1;

    if !primary.is_empty() {
        groups.push(GeneratedGroup {
            name: PRIMARY_GROUP_NAME.to_string(),
            fields: primary,
            order: next_order,
        });
        next_order += 1;
    }

    for (hop, display) in relations {
        if let Some(fields) = members.remove(&hop) {
            groups.push(GeneratedGroup {
                name: format!("{display} Details"),
                fields,
                order: next_order,
            });
            next_order += 1;
        }
    }

    // Leftover buckets mean a leaf arrived under a hop with no marker
    // (defensive; should not happen for well-formed expansions).
    let mut leftovers: Vec<(String, Vec<FieldConfig>)> = members.into_iter().collect();
    leftovers.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (hop, fields) in leftovers {
        groups.push(GeneratedGroup {
            name: format!("{} Details", derive_label(&hop)),
            fields,
            order: next_order,
        });
        next_order += 1;
    }

    groups
}
