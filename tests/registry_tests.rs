use metagrid::metadata::registry::DescriptorSource;
use metagrid::MetadataRegistry;
use std::fs;

#[test]
fn loads_entity_documents_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("accounts.json"),
        serde_json::json!({
            "name": "accounts",
            "fields": [
                {"key": "name", "storage_type": "text", "is_mandatory": true},
                {"key": "balance", "storage_type": "numeric", "is_read_only": true},
            ]
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("contacts.json"),
        serde_json::json!({
            "name": "contacts",
            "display_name": "People",
            "fields": [{"key": "email", "storage_type": "text"}]
        })
        .to_string(),
    )
    .unwrap();

    let mut registry = MetadataRegistry::new();
    let report = registry.load_from_dir(dir.path()).unwrap();

    assert_eq!(report.loaded.len(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(registry.entity_names(), vec!["accounts", "contacts"]);

    let accounts = registry.get("accounts").unwrap();
    assert!(accounts.fields[0].is_mandatory);
    assert_eq!(registry.get("contacts").unwrap().label(), "People");
}

#[test]
fn broken_documents_are_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("good.json"),
        serde_json::json!({"name": "good", "fields": []}).to_string(),
    )
    .unwrap();
    fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    fs::write(
        dir.path().join("nameless.json"),
        serde_json::json!({"fields": []}).to_string(),
    )
    .unwrap();
    // Non-JSON files are ignored entirely.
    fs::write(dir.path().join("readme.txt"), "not metadata").unwrap();

    let mut registry = MetadataRegistry::new();
    let report = registry.load_from_dir(dir.path()).unwrap();

    assert_eq!(report.loaded, vec!["good"]);
    assert_eq!(report.failed.len(), 2);
    assert!(registry.contains("good"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn malformed_descriptors_are_dropped_at_the_boundary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("orders.json"),
        serde_json::json!({
            "name": "orders",
            "fields": [
                {"key": "number", "storage_type": "text"},
                {"storage_type": "text"},
                {"key": "total", "storage_type": "numeric"},
            ]
        })
        .to_string(),
    )
    .unwrap();

    let mut registry = MetadataRegistry::new();
    registry.load_from_dir(dir.path()).unwrap();

    let fields = registry.descriptors_for("orders").unwrap().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].key, "number");
    assert_eq!(fields[1].key, "total");

    // Display names are filled during normalization.
    assert_eq!(fields[0].display_name.as_deref(), Some("Number"));
}

#[test]
fn missing_directory_is_an_error() {
    let mut registry = MetadataRegistry::new();
    assert!(registry
        .load_from_dir(std::path::Path::new("does/not/exist"))
        .is_err());
}
