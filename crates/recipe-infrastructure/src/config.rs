//! Application configuration (`config.toml`).
//!
//! All fields are optional in the file; anything missing takes its default.

use crate::paths::RecipePaths;
use crate::storage::AtomicFile;
use recipe_core::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_event_capacity() -> usize {
    64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overrides where sessions, folders and secrets are stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Overrides the location of the local recipe catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// `tracing` filter used when `RECIPE_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Buffered change events per subscriber before it starts lagging
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog_path: None,
            log_filter: default_log_filter(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl AppConfig {
    /// Loads `config.toml` from `path`, falling back to defaults when the
    /// file is missing or empty.
    pub fn load(path: &Path) -> Result<Self> {
        let config = AtomicFile::<AppConfig>::toml(path.to_path_buf())
            .load()?
            .unwrap_or_default();
        Ok(config)
    }

    /// Writes the config to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        AtomicFile::<AppConfig>::toml(path.to_path_buf()).save(self)?;
        Ok(())
    }

    /// Paths for the durable store, honouring `data_dir`.
    pub fn paths(&self, fallback: &RecipePaths) -> RecipePaths {
        match &self.data_dir {
            Some(dir) => RecipePaths::new(dir.clone()),
            None => fallback.clone(),
        }
    }

    pub fn catalog_file(&self, paths: &RecipePaths) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| paths.catalog_file())
    }
}
