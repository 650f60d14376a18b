//! Runtime configuration loaded from TOML.
//!
//! Used by the CLI and embedding services; the engine itself takes
//! everything it needs as parameters. A missing config file is not an
//! error — every setting has a default.

use crate::error::MetaGridResult;
use crate::generator::classifier::GeneratorOptions;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Crate-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaGridConfig {
    /// Directory holding entity metadata JSON documents
    pub metadata_dir: PathBuf,
    /// Options applied when a generation request does not carry its own
    pub default_options: GeneratorOptions,
}

impl Default for MetaGridConfig {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from("metadata"),
            default_options: GeneratorOptions::default(),
        }
    }
}

impl MetaGridConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist. A file that exists but fails to parse is
    /// an error — silently ignoring a broken config hides operator
    /// mistakes.
    pub fn load(path: &Path) -> MetaGridResult<Self> {
        if !path.exists() {
            info!(
                "No config file at {}; using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
