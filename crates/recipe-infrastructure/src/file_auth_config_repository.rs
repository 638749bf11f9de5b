//! File-backed AuthConfigRepository implementation.

use crate::storage::{blocking, AtomicFile};
use async_trait::async_trait;
use recipe_core::auth::{AuthConfig, AuthConfigRepository};
use recipe_core::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

type AuthConfigMap = BTreeMap<String, AuthConfig>;

/// Stores every recipe's auth settings in one JSON map keyed by recipe id.
///
/// `set` and `delete` are locked read-modify-write cycles so concurrent
/// writers to different recipes do not lose each other's changes.
#[derive(Clone)]
pub struct FileAuthConfigRepository {
    file: Arc<AtomicFile<AuthConfigMap>>,
}

impl FileAuthConfigRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path)),
        }
    }
}

#[async_trait]
impl AuthConfigRepository for FileAuthConfigRepository {
    async fn get(&self, recipe_id: &str) -> Result<Option<AuthConfig>> {
        let file = self.file.clone();
        let map = blocking(move || Ok(file.load()?)).await?;
        Ok(map.and_then(|mut m| m.remove(recipe_id)))
    }

    async fn set(&self, recipe_id: &str, config: AuthConfig) -> Result<()> {
        let file = self.file.clone();
        let recipe_id = recipe_id.to_string();
        blocking(move || {
            file.update(AuthConfigMap::new(), |map| {
                map.insert(recipe_id, config);
                Ok(())
            })?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, recipe_id: &str) -> Result<()> {
        let file = self.file.clone();
        let recipe_id = recipe_id.to_string();
        blocking(move || {
            if file.load()?.is_none() {
                return Ok(());
            }
            file.update(AuthConfigMap::new(), |map| {
                map.remove(&recipe_id);
                Ok(())
            })?;
            Ok(())
        })
        .await
    }
}
