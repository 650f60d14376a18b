//! Entity metadata documents as stored by the descriptor store.

use super::descriptor::{derive_label, FieldDescriptor};
use serde::{Deserialize, Serialize};

/// The ordered descriptor list for one entity, plus its naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl EntityMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            fields: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Human label: explicit display name, or a title-cased derivation of
    /// the last dot-segment of the entity name ("public.sales_orders"
    /// becomes "Sales Orders").
    pub fn label(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => derive_label(self.name.rsplit('.').next().unwrap_or(&self.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_last_segment_of_qualified_name() {
        let entity = EntityMetadata::new("public.sales_orders");
        assert_eq!(entity.label(), "Sales Orders");
    }
}
