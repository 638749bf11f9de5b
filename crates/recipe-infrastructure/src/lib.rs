//! File-backed implementations of the recipe-core traits.

pub mod config;
pub mod file_auth_config_repository;
pub mod file_folder_repository;
pub mod file_session_repository;
pub mod paths;
pub mod secret_vault;
pub mod storage;
pub mod toml_recipe_catalog;

pub use crate::config::AppConfig;
pub use crate::file_auth_config_repository::FileAuthConfigRepository;
pub use crate::file_folder_repository::FileFolderRepository;
pub use crate::file_session_repository::FileSessionRepository;
pub use crate::paths::RecipePaths;
pub use crate::secret_vault::FileSecretVault;
pub use crate::toml_recipe_catalog::TomlRecipeCatalog;
