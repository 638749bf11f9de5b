//! Path management for the playground's local store.
//!
//! Every durable key lives under one data directory:
//!
//! ```text
//! ~/.config/recipe-playground/   # default base (dirs::config_dir)
//! ├── config.toml                # AppConfig
//! ├── catalog.toml               # Local recipe catalog
//! ├── sessions.json              # Session snapshot
//! ├── folders.json               # Folder collection
//! ├── auth_configs.json          # Per-recipe auth settings
//! └── secrets/                   # One file per secret (mode 600)
//!     └── <id>.json
//! ```

use recipe_core::{RecipeError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "recipe-playground";

/// Resolves the fixed storage keys relative to a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePaths {
    base_dir: PathBuf,
}

impl RecipePaths {
    /// Uses `base_dir` as the data directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Uses the platform config directory (e.g. `~/.config/recipe-playground`).
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RecipeError::config("Cannot determine config directory"))?;
        Ok(Self::new(config_dir.join(APP_DIR_NAME)))
    }

    /// Uses `base_dir` when given, otherwise the default location.
    pub fn resolve(base_dir: Option<&Path>) -> Result<Self> {
        match base_dir {
            Some(dir) => Ok(Self::new(dir)),
            None => Self::default_location(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.base_dir.join("catalog.toml")
    }

    pub fn sessions_file(&self) -> PathBuf {
        self.base_dir.join("sessions.json")
    }

    pub fn folders_file(&self) -> PathBuf {
        self.base_dir.join("folders.json")
    }

    pub fn auth_configs_file(&self) -> PathBuf {
        self.base_dir.join("auth_configs.json")
    }

    pub fn secrets_dir(&self) -> PathBuf {
        self.base_dir.join("secrets")
    }
}
