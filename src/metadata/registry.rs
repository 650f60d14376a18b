//! In-memory descriptor store and metadata directory discovery.
//!
//! The registry is the crate's own implementation of the descriptor-store
//! boundary: entity metadata documents registered programmatically or
//! discovered from a directory of JSON files. Generation never requires
//! it — any [`DescriptorSource`] works — but the CLI and tests run
//! against it.

use crate::error::MetaGridResult;
use crate::metadata::types::{EntityMetadata, FieldDescriptor, MetadataError};
use crate::metadata::validate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Supplies descriptors per entity identifier.
///
/// `Ok(None)` means "no metadata available / lookup failed", which the
/// engine treats as a leaf field, not an exception. An `Err` is a genuine
/// source failure (transport, storage) and propagates to the caller.
pub trait DescriptorSource {
    fn descriptors_for(&self, entity: &str) -> Result<Option<Vec<FieldDescriptor>>, MetadataError>;
}

/// Report of a metadata directory discovery pass.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetadataLoadReport {
    /// Entity names discovered in the directory
    pub discovered: Vec<String>,
    /// Entities loaded into the registry
    pub loaded: Vec<String>,
    /// Files that failed to parse, with error messages
    pub failed: Vec<(String, String)>,
    /// Timestamp of the discovery pass
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// In-memory entity metadata store.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    entities: HashMap<String, EntityMetadata>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Register entity metadata, normalizing its descriptor list at the
    /// boundary. Replaces any previous registration under the same name.
    pub fn register(&mut self, mut entity: EntityMetadata) {
        entity.fields = validate::normalize_descriptors(entity.fields);
        self.entities.insert(entity.name.clone(), entity);
    }

    pub fn get(&self, name: &str) -> Option<&EntityMetadata> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Registered entity names, sorted for stable listings.
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entities.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Discover entity documents (`*.json`) in a directory and load them.
    ///
    /// Unparseable files are reported and skipped, never fatal — one bad
    /// document must not prevent the rest of the directory from loading.
    pub fn load_from_dir(&mut self, dir: &Path) -> MetaGridResult<MetadataLoadReport> {
        info!("Discovering entity metadata from {}", dir.display());

        let mut discovered = Vec::new();
        let mut loaded = Vec::new();
        let mut failed = Vec::new();

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
            .collect();
        paths.sort();

        for path in paths {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let contents = match std::fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    failed.push((file_name, e.to_string()));
                    continue;
                }
            };

            let document = match serde_json::from_str::<serde_json::Value>(&contents) {
                Ok(document) => document,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    failed.push((file_name, e.to_string()));
                    continue;
                }
            };

            match validate::parse_entity_document(document) {
                Ok(entity) => {
                    let name = entity.name.clone();
                    discovered.push(name.clone());
                    self.register(entity);
                    info!("Loaded entity metadata '{name}' from {file_name}");
                    loaded.push(name);
                }
                Err(e) => {
                    warn!("Rejected entity document {}: {}", path.display(), e);
                    failed.push((file_name, e.to_string()));
                }
            }
        }

        info!(
            "Metadata discovery complete: {} discovered, {} loaded, {} failed",
            discovered.len(),
            loaded.len(),
            failed.len()
        );

        Ok(MetadataLoadReport {
            discovered,
            loaded,
            failed,
            last_updated: chrono::Utc::now(),
        })
    }
}

impl DescriptorSource for MetadataRegistry {
    fn descriptors_for(&self, entity: &str) -> Result<Option<Vec<FieldDescriptor>>, MetadataError> {
        Ok(self.entities.get(entity).map(|e| e.fields.clone()))
    }
}
