//! Catalog records as returned by the hosted data source.

use crate::auth::RecipeAuthType;
use crate::session::HttpMethod;
use serde::{Deserialize, Serialize};

/// A request template published in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    /// Name of the project this recipe belongs to
    pub project: String,
    pub method: HttpMethod,
    /// `None` when the API needs no authentication
    #[serde(default)]
    pub auth: Option<RecipeAuthType>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Link to the provider's auth guide
    #[serde(default)]
    pub docs_url: Option<String>,
}

impl Recipe {
    pub fn needs_auth(&self) -> bool {
        self.auth.is_some()
    }
}

/// A named group of recipes, usually one per third-party API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name, used as the lookup key
    pub project: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A pending request to fork a recipe into a new session.
///
/// Encoded as `"<recipe_id>::<title>"`; the title part is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkRequest {
    pub recipe_id: String,
    pub title: Option<String>,
}

impl ForkRequest {
    const SEPARATOR: &'static str = "::";

    /// Parses an encoded fork request. Returns `None` for an empty id.
    pub fn parse(encoded: &str) -> Option<Self> {
        let (id, title) = match encoded.split_once(Self::SEPARATOR) {
            Some((id, title)) => (id, Some(title)),
            None => (encoded, None),
        };

        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        Some(Self {
            recipe_id: id.to_string(),
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        })
    }

    pub fn encode(&self) -> String {
        match &self.title {
            Some(title) => format!("{}{}{}", self.recipe_id, Self::SEPARATOR, title),
            None => self.recipe_id.clone(),
        }
    }
}
