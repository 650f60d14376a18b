//! Field inclusion rules for generated artifacts.
//!
//! The exclusion chain is evaluated in declaration order with first match
//! wins. The order is load-bearing: a hidden mandatory field must be
//! excluded by the display rule before the required list is ever
//! consulted, and the read-only rule must not shadow the display rule.
//! Keep new rules at the end of the chain.

use crate::metadata::types::{FieldDescriptor, SemanticRole};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Columns maintained by the platform itself; hidden from forms unless the
/// caller asks for them. Matched on the root segment of the key so virtual
/// sub-paths of system columns are covered too.
pub static SYSTEM_FIELDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "updated_by",
        "organization_id",
        "location_id",
    ]
    .into_iter()
    .collect()
});

/// Toggles for a generation pass.
///
/// Unrecognized or missing options deserialize to their documented
/// defaults — a partial options record is never an error. Forms mark
/// mandatory fields required and expand JSONB sub-paths unless told
/// otherwise; system and read-only fields are opt-in. `entity_name`
/// overrides the schema title when non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub include_system_fields: bool,
    pub include_read_only_fields: bool,
    pub expand_jsonb_fields: bool,
    pub generate_required: bool,
    pub entity_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            include_system_fields: false,
            include_read_only_fields: false,
            expand_jsonb_fields: true,
            generate_required: true,
            entity_name: String::new(),
        }
    }
}

type Rule = (&'static str, fn(&FieldDescriptor, &GeneratorOptions) -> bool);

fn rule_not_displayable(field: &FieldDescriptor, _options: &GeneratorOptions) -> bool {
    !field.is_displayable
}

fn rule_system_field(field: &FieldDescriptor, options: &GeneratorOptions) -> bool {
    !options.include_system_fields && SYSTEM_FIELDS.contains(field.root_segment())
}

fn rule_read_only(field: &FieldDescriptor, options: &GeneratorOptions) -> bool {
    field.is_read_only && !options.include_read_only_fields
}

fn rule_computed_aggregate(field: &FieldDescriptor, _options: &GeneratorOptions) -> bool {
    field.is_virtual && !is_jsonb_backed(field) && is_computed_aggregate(field)
}

fn rule_raw_jsonb_container(field: &FieldDescriptor, _options: &GeneratorOptions) -> bool {
    !field.is_virtual && field.storage_type.eq_ignore_ascii_case("jsonb")
}

fn rule_collapsed_jsonb_path(field: &FieldDescriptor, options: &GeneratorOptions) -> bool {
    !options.expand_jsonb_fields && is_jsonb_backed(field)
}

const EXCLUSION_RULES: &[Rule] = &[
    ("not-displayable", rule_not_displayable),
    ("system-field", rule_system_field),
    ("read-only", rule_read_only),
    ("computed-aggregate", rule_computed_aggregate),
    ("raw-jsonb-container", rule_raw_jsonb_container),
    ("collapsed-jsonb-path", rule_collapsed_jsonb_path),
];

/// First matching exclusion rule, or `None` when the field participates.
pub fn exclusion_reason(
    field: &FieldDescriptor,
    options: &GeneratorOptions,
) -> Option<&'static str> {
    EXCLUSION_RULES
        .iter()
        .find(|(_, rule)| rule(field, options))
        .map(|(name, _)| *name)
}

/// Whether a field participates in a generated artifact.
pub fn should_include(field: &FieldDescriptor, options: &GeneratorOptions) -> bool {
    exclusion_reason(field, options).is_none()
}

/// Whether an *included* field joins the required list. Evaluated
/// independently of the exclusion chain.
pub fn is_required(field: &FieldDescriptor, options: &GeneratorOptions) -> bool {
    options.generate_required && field.is_mandatory
}

/// A virtual field whose key contains `.` is a sub-path expanded out of a
/// JSONB container column. The descriptor model carries no explicit
/// container pointer, so the dotted key is the evidence.
pub(crate) fn is_jsonb_backed(field: &FieldDescriptor) -> bool {
    field.is_virtual && field.key.contains('.')
}

/// A `default_aggregation` counts as evidence of a computed field even
/// when the role is `dimension`; both conditions trigger independently.
/// Flagged for product-owner review in DESIGN.md — do not "fix" here.
pub(crate) fn is_computed_aggregate(field: &FieldDescriptor) -> bool {
    match &field.semantic_type {
        Some(semantic) => {
            semantic.role == SemanticRole::Measure || semantic.default_aggregation.is_some()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::types::SemanticType;

    fn options() -> GeneratorOptions {
        GeneratorOptions::default()
    }

    #[test]
    fn hidden_field_is_excluded_first() {
        // Rule 1 dominates even when rule 3 would also match.
        let field = FieldDescriptor::new("secret", "text").hidden().read_only();
        assert_eq!(exclusion_reason(&field, &options()), Some("not-displayable"));
    }

    #[test]
    fn hidden_mandatory_field_is_still_excluded() {
        let field = FieldDescriptor::new("internal_note", "text")
            .hidden()
            .mandatory();
        assert_eq!(exclusion_reason(&field, &options()), Some("not-displayable"));
    }

    #[test]
    fn system_fields_excluded_by_default() {
        let field = FieldDescriptor::new("created_at", "timestamptz");
        assert_eq!(exclusion_reason(&field, &options()), Some("system-field"));

        let mut opts = options();
        opts.include_system_fields = true;
        assert!(should_include(&field, &opts));
    }

    #[test]
    fn system_rule_matches_on_root_segment() {
        let field = FieldDescriptor::new("organization_id.name", "text").virtual_path();
        assert_eq!(exclusion_reason(&field, &options()), Some("system-field"));
    }

    #[test]
    fn system_rule_outranks_read_only_rule() {
        let field = FieldDescriptor::new("updated_at", "timestamptz").read_only();
        assert_eq!(exclusion_reason(&field, &options()), Some("system-field"));
    }

    #[test]
    fn read_only_excluded_unless_requested() {
        let field = FieldDescriptor::new("balance", "numeric").read_only();
        assert_eq!(exclusion_reason(&field, &options()), Some("read-only"));

        let mut opts = options();
        opts.include_read_only_fields = true;
        assert!(should_include(&field, &opts));
    }

    #[test]
    fn measure_virtual_field_is_excluded() {
        let field = FieldDescriptor::new("total_revenue", "numeric")
            .virtual_path()
            .with_semantic_type(SemanticType::new(SemanticRole::Measure));
        assert_eq!(
            exclusion_reason(&field, &options()),
            Some("computed-aggregate")
        );
    }

    #[test]
    fn dimension_with_default_aggregation_is_excluded_too() {
        // Preserved overlap: aggregation evidence alone triggers the rule.
        let field = FieldDescriptor::new("order_count", "integer")
            .virtual_path()
            .with_semantic_type(
                SemanticType::new(SemanticRole::Dimension).with_default_aggregation("count"),
            );
        assert_eq!(
            exclusion_reason(&field, &options()),
            Some("computed-aggregate")
        );
    }

    #[test]
    fn plain_virtual_view_column_is_kept() {
        let field = FieldDescriptor::new("full_name", "text").virtual_path();
        assert!(should_include(&field, &options()));
    }

    #[test]
    fn raw_jsonb_container_is_excluded() {
        let field = FieldDescriptor::new("details", "jsonb");
        assert_eq!(
            exclusion_reason(&field, &options()),
            Some("raw-jsonb-container")
        );
    }

    #[test]
    fn jsonb_sub_path_follows_expand_option() {
        let field = FieldDescriptor::new("details.zip", "text").virtual_path();
        assert!(should_include(&field, &options()));

        let mut opts = options();
        opts.expand_jsonb_fields = false;
        assert_eq!(
            exclusion_reason(&field, &opts),
            Some("collapsed-jsonb-path")
        );
    }

    #[test]
    fn required_is_independent_of_inclusion() {
        let field = FieldDescriptor::new("name", "text").mandatory();
        assert!(is_required(&field, &options()));

        let mut opts = options();
        opts.generate_required = false;
        assert!(!is_required(&field, &opts));

        let optional = FieldDescriptor::new("nickname", "text");
        assert!(!is_required(&optional, &options()));
    }

    #[test]
    fn options_deserialize_from_partial_records() {
        let opts: GeneratorOptions =
            serde_json::from_value(serde_json::json!({"include_system_fields": true})).unwrap();
        assert!(opts.include_system_fields);
        assert!(opts.generate_required);
        assert!(opts.expand_jsonb_fields);
        assert!(!opts.include_read_only_fields);

        let opts: GeneratorOptions =
            serde_json::from_value(serde_json::json!({"unknown_flag": 42})).unwrap();
        assert_eq!(opts, GeneratorOptions::default());
    }
}
