//! Storage-type to schema-type mapping and UI widget hints.
//!
//! Foreign-key mapping takes priority over everything else: a reference
//! field is always a string with an object-valued `enum` naming the lookup
//! table and display column, regardless of the storage type under it.
//! Downstream form rendering also depends on the date vs date-time
//! distinction; the rest of the hints are heuristics.

use crate::metadata::types::FieldDescriptor;
use serde::{Deserialize, Serialize};

/// Display column used when a foreign key does not name one.
const DEFAULT_DISPLAY_COLUMN: &str = "name";

/// Target schema primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Format hint attached to string-typed properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaFormat {
    Date,
    DateTime,
    Email,
    Uri,
}

/// Object-valued enum signaling "resolve via lookup", not a literal value
/// list: the form renderer queries `table` and shows `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRef {
    pub table: String,
    pub column: String,
}

/// Element schema for array-typed properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
}

/// One property of the generated data schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SchemaFormat>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemSchema>,
    #[serde(rename = "readOnly", default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl FieldSchema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            title: None,
            format: None,
            lookup: None,
            items: None,
            read_only: None,
        }
    }
}

/// Per-field UI hints; serialized into the UI schema only when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiHints {
    #[serde(rename = "ui:widget", default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(
        rename = "ui:placeholder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<String>,
    #[serde(rename = "ui:readonly", default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
}

impl UiHints {
    pub fn is_empty(&self) -> bool {
        self.widget.is_none() && self.placeholder.is_none() && self.readonly.is_none()
    }
}

/// Map a descriptor to its data-schema property.
pub fn map_to_schema_type(field: &FieldDescriptor) -> FieldSchema {
    let mut schema = match &field.foreign_key {
        Some(foreign_key) => {
            let mut schema = FieldSchema::of(SchemaType::String);
            schema.lookup = Some(LookupRef {
                table: foreign_key.source_entity.clone(),
                column: foreign_key
                    .display_column
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DISPLAY_COLUMN.to_string()),
            });
            schema
        }
        None => map_storage_type(&field.storage_type),
    };

    if schema.schema_type == SchemaType::String && schema.format.is_none() {
        schema.format = key_format_hint(&field.key);
    }
    if field.is_read_only {
        schema.read_only = Some(true);
    }
    schema
}

fn map_storage_type(storage_type: &str) -> FieldSchema {
    let name = storage_type.trim().to_ascii_lowercase();

    if let Some(element) = array_element_type(&name) {
        let mut schema = FieldSchema::of(SchemaType::Array);
        schema.items = Some(ItemSchema {
            schema_type: scalar_schema_type(element).0,
        });
        return schema;
    }

    let (schema_type, format) = scalar_schema_type(&name);
    let mut schema = FieldSchema::of(schema_type);
    schema.format = format;
    schema
}

fn scalar_schema_type(name: &str) -> (SchemaType, Option<SchemaFormat>) {
    match name {
        "text" | "uuid" | "citext" => (SchemaType::String, None),
        "bool" | "boolean" => (SchemaType::Boolean, None),
        "int" | "int2" | "int4" | "int8" | "smallint" | "integer" | "bigint" | "serial"
        | "smallserial" | "bigserial" => (SchemaType::Integer, None),
        "numeric" | "decimal" | "real" | "double" | "double precision" | "float4" | "float8" => {
            (SchemaType::Number, None)
        }
        "date" => (SchemaType::String, Some(SchemaFormat::Date)),
        "jsonb" | "json" => (SchemaType::Object, None),
        _ if name.starts_with("timestamp") => (SchemaType::String, Some(SchemaFormat::DateTime)),
        _ if name.starts_with("varchar") || name.starts_with("char") || name.starts_with("character") => {
            (SchemaType::String, None)
        }
        _ => (SchemaType::String, None),
    }
}

/// Array storage types arrive either pg-internal (`_text`) or SQL-style
/// (`text[]`); returns the element type name when the input is an array.
fn array_element_type(name: &str) -> Option<&str> {
    if let Some(element) = name.strip_suffix("[]") {
        return Some(element);
    }
    name.strip_prefix('_')
}

fn key_format_hint(key: &str) -> Option<SchemaFormat> {
    if key.contains("email") {
        Some(SchemaFormat::Email)
    } else if key.contains("url") || key.contains("website") {
        Some(SchemaFormat::Uri)
    } else {
        None
    }
}

/// Map a descriptor to its UI hints.
pub fn map_to_ui_hints(field: &FieldDescriptor) -> UiHints {
    let mut hints = UiHints::default();
    let key = field.key.to_ascii_lowercase();
    let storage = field.storage_type.trim().to_ascii_lowercase();

    if key.contains("email") {
        hints.placeholder = Some("name@example.com".to_string());
    } else if key.contains("phone") || key.contains("mobile") {
        hints.widget = Some("phone".to_string());
    } else if key.contains("description") || key.contains("notes") {
        hints.widget = Some("textarea".to_string());
    }

    if matches!(array_element_type(&storage), Some("text" | "varchar" | "citext")) {
        hints.widget = Some("tags".to_string());
    }

    if field.is_read_only {
        hints.readonly = Some(true);
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::types::ForeignKeyRef;

    #[test]
    fn foreign_key_outranks_storage_type() {
        let field = FieldDescriptor::new("account_id", "integer")
            .with_foreign_key(ForeignKeyRef::new("accounts", "id"));
        let schema = map_to_schema_type(&field);
        assert_eq!(schema.schema_type, SchemaType::String);
        let lookup = schema.lookup.unwrap();
        assert_eq!(lookup.table, "accounts");
        assert_eq!(lookup.column, "name");
    }

    #[test]
    fn foreign_key_display_column_is_honored() {
        let field = FieldDescriptor::new("owner_id", "uuid").with_foreign_key(
            ForeignKeyRef::new("users", "id").with_display_column("email"),
        );
        let lookup = map_to_schema_type(&field).lookup.unwrap();
        assert_eq!(lookup.column, "email");
    }

    #[test]
    fn date_and_timestamp_map_to_distinct_formats() {
        let due = map_to_schema_type(&FieldDescriptor::new("due_date", "date"));
        assert_eq!(due.schema_type, SchemaType::String);
        assert_eq!(due.format, Some(SchemaFormat::Date));

        let created = map_to_schema_type(&FieldDescriptor::new("created_at", "timestamptz"));
        assert_eq!(created.schema_type, SchemaType::String);
        assert_eq!(created.format, Some(SchemaFormat::DateTime));

        let verbose = map_to_schema_type(&FieldDescriptor::new(
            "archived_at",
            "timestamp with time zone",
        ));
        assert_eq!(verbose.format, Some(SchemaFormat::DateTime));
    }

    #[test]
    fn numeric_families_split_integer_and_number() {
        assert_eq!(
            map_to_schema_type(&FieldDescriptor::new("count", "int8")).schema_type,
            SchemaType::Integer
        );
        assert_eq!(
            map_to_schema_type(&FieldDescriptor::new("price", "numeric")).schema_type,
            SchemaType::Number
        );
    }

    #[test]
    fn boolean_and_uuid_map_directly() {
        assert_eq!(
            map_to_schema_type(&FieldDescriptor::new("active", "bool")).schema_type,
            SchemaType::Boolean
        );
        assert_eq!(
            map_to_schema_type(&FieldDescriptor::new("ref", "uuid")).schema_type,
            SchemaType::String
        );
    }

    #[test]
    fn array_types_map_with_element_items() {
        for storage in ["text[]", "_text"] {
            let schema = map_to_schema_type(&FieldDescriptor::new("tags", storage));
            assert_eq!(schema.schema_type, SchemaType::Array);
            assert_eq!(schema.items.unwrap().schema_type, SchemaType::String);
        }

        let ints = map_to_schema_type(&FieldDescriptor::new("scores", "_int4"));
        assert_eq!(ints.items.unwrap().schema_type, SchemaType::Integer);
    }

    #[test]
    fn unrecognized_storage_type_degrades_to_string() {
        let schema = map_to_schema_type(&FieldDescriptor::new("geo", "geography"));
        assert_eq!(schema.schema_type, SchemaType::String);
        assert!(schema.format.is_none());
    }

    #[test]
    fn email_key_gets_format_and_placeholder() {
        let field = FieldDescriptor::new("contact_email", "text");
        assert_eq!(
            map_to_schema_type(&field).format,
            Some(SchemaFormat::Email)
        );
        assert_eq!(
            map_to_ui_hints(&field).placeholder.as_deref(),
            Some("name@example.com")
        );
    }

    #[test]
    fn long_text_keys_get_textarea() {
        let field = FieldDescriptor::new("notes", "text");
        assert_eq!(map_to_ui_hints(&field).widget.as_deref(), Some("textarea"));
    }

    #[test]
    fn text_arrays_get_tag_widget() {
        let field = FieldDescriptor::new("labels", "text[]");
        assert_eq!(map_to_ui_hints(&field).widget.as_deref(), Some("tags"));
    }

    #[test]
    fn read_only_propagates_to_both_artifacts() {
        let field = FieldDescriptor::new("balance", "numeric").read_only();
        assert_eq!(map_to_schema_type(&field).read_only, Some(true));
        assert_eq!(map_to_ui_hints(&field).readonly, Some(true));
    }
}
