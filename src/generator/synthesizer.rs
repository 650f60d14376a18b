//! Data/UI schema pair assembly for dynamic forms.
//!
//! Pure function of its inputs: filter the descriptor list through the
//! classifier in input order, map each survivor through the type mapper,
//! and accumulate the paired artifacts. Field ordering is carried by an
//! explicit `ui:order` list, so property storage stays deterministic.

use crate::generator::classifier::{self, GeneratorOptions};
use crate::generator::typemap::{self, FieldSchema, SchemaType, UiHints};
use crate::metadata::types::descriptor::derive_label;
use crate::metadata::types::FieldDescriptor;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generated data schema: properties plus the required list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSchema {
    pub title: String,
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    pub properties: BTreeMap<String, FieldSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// Generated UI schema: explicit ordering plus per-field widget hints.
/// Every key other than the ordering entry exists in the data schema's
/// properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSchema {
    #[serde(rename = "ui:order", default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, UiHints>,
}

/// The paired artifacts a dynamic form is rendered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchemaPair {
    pub data_schema: DataSchema,
    pub ui_schema: UiSchema,
}

/// Assemble the schema pair for one entity's descriptor list.
pub fn synthesize(
    entity_name: &str,
    fields: &[FieldDescriptor],
    options: &GeneratorOptions,
) -> GeneratedSchemaPair {
    let mut properties = BTreeMap::new();
    let mut ui_fields = BTreeMap::new();
    let mut order = Vec::new();
    let mut required = Vec::new();

    for field in fields {
        if field.key.is_empty() {
            warn!("Skipping descriptor with missing key in '{entity_name}'");
            continue;
        }
        if let Some(reason) = classifier::exclusion_reason(field, options) {
            debug!("Excluding '{}' from '{entity_name}' ({reason})", field.key);
            continue;
        }
        if properties.contains_key(&field.key) {
            warn!("Duplicate descriptor key '{}' in '{entity_name}'", field.key);
            continue;
        }

        let mut schema = typemap::map_to_schema_type(field);
        schema.title = Some(field.label());
        let hints = typemap::map_to_ui_hints(field);

        order.push(field.key.clone());
        if !hints.is_empty() {
            ui_fields.insert(field.key.clone(), hints);
        }
        if classifier::is_required(field, options) {
            required.push(field.key.clone());
        }
        properties.insert(field.key.clone(), schema);
    }

    GeneratedSchemaPair {
        data_schema: DataSchema {
            title: schema_title(entity_name),
            schema_type: SchemaType::Object,
            properties,
            required,
        },
        ui_schema: UiSchema {
            order,
            fields: ui_fields,
        },
    }
}

/// Schema title from an entity name: last dot-segment, underscores to
/// spaces, title-cased ("public.sales_orders" becomes "Sales Orders").
pub(crate) fn schema_title(entity_name: &str) -> String {
    derive_label(entity_name.rsplit('.').next().unwrap_or(entity_name))
}
