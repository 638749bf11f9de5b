//! Per-recipe credentials.
//!
//! Joins the auth settings repository with the secret vault. Both are keyed
//! by recipe id, so linked session copies share credentials.

use recipe_core::auth::{AuthConfig, AuthConfigRepository};
use recipe_core::secret::SecretVault;
use recipe_core::{RecipeError, Result};
use std::fmt;
use std::sync::Arc;

/// Auth settings and secret for one recipe.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RecipeCredentials {
    pub config: Option<AuthConfig>,
    pub secret: Option<String>,
}

impl RecipeCredentials {
    /// True when settings are complete and a secret is stored.
    pub fn is_ready(&self) -> bool {
        self.secret.is_some() && self.config.as_ref().is_some_and(AuthConfig::is_complete)
    }
}

impl fmt::Debug for RecipeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeCredentials")
            .field("config", &self.config)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub struct AuthService {
    configs: Arc<dyn AuthConfigRepository>,
    vault: Arc<dyn SecretVault>,
}

impl AuthService {
    pub fn new(configs: Arc<dyn AuthConfigRepository>, vault: Arc<dyn SecretVault>) -> Self {
        Self { configs, vault }
    }

    pub async fn credentials(&self, recipe_id: &str) -> Result<RecipeCredentials> {
        Ok(RecipeCredentials {
            config: self.configs.get(recipe_id).await?,
            secret: self.vault.get(recipe_id).await?,
        })
    }

    /// Stores the settings and, when given, the secret for `recipe_id`.
    ///
    /// Rejects `Header`/`Query` settings that do not name the parameter.
    pub async fn save(&self, recipe_id: &str, config: AuthConfig, secret: Option<&str>) -> Result<()> {
        if !config.is_complete() {
            return Err(RecipeError::config(format!(
                "{} auth needs a parameter name",
                config.auth_type
            )));
        }

        self.configs.set(recipe_id, config).await?;
        if let Some(secret) = secret {
            self.vault.set(recipe_id, secret).await?;
        }
        tracing::info!("[AuthService] Saved credentials for recipe {}", recipe_id);
        Ok(())
    }

    /// Removes both settings and secret. Absent entries are fine.
    pub async fn clear(&self, recipe_id: &str) -> Result<()> {
        self.vault.delete(recipe_id).await?;
        self.configs.delete(recipe_id).await?;
        tracing::info!("[AuthService] Cleared credentials for recipe {}", recipe_id);
        Ok(())
    }
}
