//! File-backed FolderRepository implementation.

use crate::storage::{blocking, AtomicFile};
use recipe_core::folder::{Folder, FolderRepository};
use recipe_core::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// On-disk shape of `folders.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FolderDocument {
    #[serde(default)]
    folders: Vec<Folder>,
}

/// Stores the folder collection in one JSON document.
#[derive(Clone)]
pub struct FileFolderRepository {
    file: Arc<AtomicFile<FolderDocument>>,
}

impl FileFolderRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path)),
        }
    }
}

#[async_trait]
impl FolderRepository for FileFolderRepository {
    async fn load(&self) -> Result<Option<Vec<Folder>>> {
        let file = self.file.clone();
        let document = blocking(move || Ok(file.load()?)).await?;
        Ok(document.map(|d| d.folders))
    }

    async fn save(&self, folders: &[Folder]) -> Result<()> {
        let file = self.file.clone();
        let document = FolderDocument {
            folders: folders.to_vec(),
        };
        blocking(move || Ok(file.save(&document)?)).await
    }
}
