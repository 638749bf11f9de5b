//! Per-recipe authentication settings.
//!
//! Auth settings are keyed by recipe id, not session id, so a linked copy of
//! a session shares both its auth settings and its secret with the source.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a request carries its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecipeAuthType {
    /// `Authorization: Bearer <secret>`
    Bearer,
    /// Secret passed as a query parameter named by `AuthConfig::meta`
    Query,
    /// Secret passed in a header named by `AuthConfig::meta`
    Header,
    /// Reserved; not executable yet
    #[strum(serialize = "oauth")]
    #[serde(rename = "oauth")]
    OAuth,
    Custom,
}

impl RecipeAuthType {
    /// Whether `AuthConfig::meta` must name the parameter or header.
    pub fn needs_meta(self) -> bool {
        matches!(self, Self::Query | Self::Header)
    }
}

/// Auth settings for one recipe. The secret itself lives in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(rename = "type")]
    pub auth_type: RecipeAuthType,
    /// Header or query parameter name for `Header`/`Query` auth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Link to the provider's auth documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl AuthConfig {
    pub fn new(auth_type: RecipeAuthType) -> Self {
        Self {
            auth_type,
            meta: None,
            docs: None,
        }
    }

    /// True when every field the auth type requires is filled in.
    pub fn is_complete(&self) -> bool {
        !self.auth_type.needs_meta() || self.meta.as_deref().is_some_and(|m| !m.trim().is_empty())
    }
}

/// Repository for per-recipe auth settings.
#[async_trait]
pub trait AuthConfigRepository: Send + Sync {
    async fn get(&self, recipe_id: &str) -> Result<Option<AuthConfig>>;

    /// Creates or replaces the settings for `recipe_id`.
    async fn set(&self, recipe_id: &str, config: AuthConfig) -> Result<()>;

    /// Removes the settings for `recipe_id`; absent ids succeed.
    async fn delete(&self, recipe_id: &str) -> Result<()>;
}
