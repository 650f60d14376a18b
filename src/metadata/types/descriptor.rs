//! Field descriptors — one column or virtual path on an entity.
//!
//! Descriptors arrive from the descriptor store as loosely shaped JSON;
//! every optional attribute has a documented serde default so the engine
//! can assume a fully defaulted shape once `metadata::validate` has run.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Reference to another entity's identity column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Entity the reference points at
    pub source_entity: String,
    /// Identity column on the source entity
    pub source_column: String,
    /// Column used to render the related record; defaults to "name"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_column: Option<String>,
}

impl ForeignKeyRef {
    pub fn new(source_entity: impl Into<String>, source_column: impl Into<String>) -> Self {
        Self {
            source_entity: source_entity.into(),
            source_column: source_column.into(),
            display_column: None,
        }
    }

    pub fn with_display_column(mut self, column: impl Into<String>) -> Self {
        self.display_column = Some(column.into());
        self
    }
}

/// Analytical role of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticRole {
    Dimension,
    Measure,
}

/// Semantic annotations used by reporting surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticType {
    pub role: SemanticRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl SemanticType {
    pub fn new(role: SemanticRole) -> Self {
        Self {
            role,
            sub_type: None,
            default_aggregation: None,
            order: None,
        }
    }

    pub fn with_default_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.default_aggregation = Some(aggregation.into());
        self
    }
}

/// One column or virtual path on an entity.
///
/// `key` is unique within the owning entity's descriptor list and may
/// contain `.` for nested/virtual paths. Traversal never mutates a key;
/// expansion produces new descriptors with a prefixed key instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub storage_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
    #[serde(default = "default_displayable")]
    pub is_displayable: bool,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub is_searchable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_type: Option<SemanticType>,
}

fn default_displayable() -> bool {
    true
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(key: impl Into<String>, storage_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            storage_type: storage_type.into(),
            display_name: None,
            foreign_key: None,
            is_displayable: true,
            is_mandatory: false,
            is_virtual: false,
            is_read_only: false,
            is_searchable: false,
            semantic_type: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyRef) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    pub fn with_semantic_type(mut self, semantic_type: SemanticType) -> Self {
        self.semantic_type = Some(semantic_type);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_displayable = false;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    pub fn virtual_path(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    /// Human label: the explicit display name, or a title-cased derivation
    /// of the key ("account_name" becomes "Account Name").
    pub fn label(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => derive_label(&self.key),
        }
    }

    /// Text before the first `.` in the key. System-field classification
    /// works on this segment so virtual sub-paths of system columns are
    /// treated like their container.
    pub fn root_segment(&self) -> &str {
        self.key.split('.').next().unwrap_or(&self.key)
    }
}

/// Title-case a key into a display label, treating `.` and `_` as word
/// separators.
pub fn derive_label(key: &str) -> String {
    key.replace('.', " ").to_case(Case::Title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_defaults_to_title_cased_key() {
        let field = FieldDescriptor::new("account_name", "text");
        assert_eq!(field.label(), "Account Name");
    }

    #[test]
    fn label_prefers_explicit_display_name() {
        let field = FieldDescriptor::new("account_name", "text").with_display_name("Account");
        assert_eq!(field.label(), "Account");
    }

    #[test]
    fn label_handles_nested_paths() {
        let field = FieldDescriptor::new("details.zip_code", "text");
        assert_eq!(field.label(), "Details Zip Code");
    }

    #[test]
    fn root_segment_strips_nested_path() {
        let field = FieldDescriptor::new("details.zip_code", "text");
        assert_eq!(field.root_segment(), "details");

        let flat = FieldDescriptor::new("name", "text");
        assert_eq!(flat.root_segment(), "name");
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let field: FieldDescriptor =
            serde_json::from_value(serde_json::json!({"key": "name", "storage_type": "text"}))
                .unwrap();
        assert!(field.is_displayable);
        assert!(!field.is_mandatory);
        assert!(!field.is_virtual);
        assert!(!field.is_read_only);
        assert!(field.foreign_key.is_none());
    }
}
