use anyhow::{Context, Result};
use recipe_application::{AuthService, PlaygroundStore};
use recipe_infrastructure::{
    AppConfig, FileAuthConfigRepository, FileFolderRepository, FileSecretVault,
    FileSessionRepository, RecipePaths, TomlRecipeCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Resolved configuration and paths shared by every command.
pub struct AppContext {
    pub config: AppConfig,
    pub paths: RecipePaths,
}

impl AppContext {
    /// Reads `config.toml` from the data directory.
    ///
    /// An explicit `data_dir` wins over the one named in the config file.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let base = RecipePaths::resolve(data_dir.as_deref())?;
        let config = AppConfig::load(&base.config_file())
            .with_context(|| format!("Failed to read {}", base.config_file().display()))?;

        let paths = if data_dir.is_some() {
            base
        } else {
            config.paths(&base)
        };

        Ok(Self { config, paths })
    }

    pub async fn store(&self) -> Result<PlaygroundStore> {
        let store = PlaygroundStore::load_with_capacity(
            Arc::new(FileSessionRepository::new(self.paths.sessions_file())),
            Arc::new(FileFolderRepository::new(self.paths.folders_file())),
            self.config.event_capacity,
        )
        .await
        .context("Failed to load sessions")?;
        Ok(store)
    }

    pub fn vault(&self) -> FileSecretVault {
        FileSecretVault::new(self.paths.secrets_dir())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(
            Arc::new(FileAuthConfigRepository::new(self.paths.auth_configs_file())),
            Arc::new(self.vault()),
        )
    }

    pub async fn catalog(&self) -> Result<TomlRecipeCatalog> {
        let path = self.config.catalog_file(&self.paths);
        TomlRecipeCatalog::load(path.clone())
            .await
            .with_context(|| format!("Failed to read catalog {}", path.display()))
    }
}
