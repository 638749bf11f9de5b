//! TOML-backed RecipeCatalog implementation.
//!
//! A local stand-in for the hosted catalog, read from a file shaped like:
//!
//! ```toml
//! [[project]]
//! project = "GitHub"
//! title = "GitHub REST API"
//!
//! [[recipe]]
//! id = "gh-search-repos"
//! title = "Search repositories"
//! project = "GitHub"
//! method = "GET"
//! auth = "bearer"
//! ```

use crate::storage::{blocking, AtomicFile};
use async_trait::async_trait;
use recipe_core::catalog::{name_matches, Project, Recipe, RecipeCatalog};
use recipe_core::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default, rename = "project")]
    projects: Vec<Project>,
    #[serde(default, rename = "recipe")]
    recipes: Vec<Recipe>,
}

/// Catalog loaded once from a TOML file and served from memory.
#[derive(Clone)]
pub struct TomlRecipeCatalog {
    document: Arc<CatalogDocument>,
}

impl TomlRecipeCatalog {
    /// Loads the catalog. A missing file yields an empty catalog.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let file = AtomicFile::<CatalogDocument>::toml(path.clone());
        let document = blocking(move || Ok(file.load()?)).await?.unwrap_or_default();

        tracing::info!(
            "[Catalog] Loaded {} projects, {} recipes from {}",
            document.projects.len(),
            document.recipes.len(),
            path.display()
        );

        Ok(Self {
            document: Arc::new(document),
        })
    }

    /// Builds a catalog from records already in memory.
    pub fn from_records(projects: Vec<Project>, recipes: Vec<Recipe>) -> Self {
        Self {
            document: Arc::new(CatalogDocument { projects, recipes }),
        }
    }
}

#[async_trait]
impl RecipeCatalog for TomlRecipeCatalog {
    async fn find_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>> {
        Ok(self
            .document
            .recipes
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned())
    }

    async fn find_project(&self, name: &str) -> Result<Option<Project>> {
        Ok(self
            .document
            .projects
            .iter()
            .find(|p| name_matches(&p.project, name))
            .cloned())
    }

    async fn recipes_for_project(&self, name: &str) -> Result<Vec<Recipe>> {
        Ok(self
            .document
            .recipes
            .iter()
            .filter(|r| name_matches(&r.project, name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::auth::RecipeAuthType;
    use recipe_core::catalog::RecipeLookup;
    use recipe_core::session::HttpMethod;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
[[project]]
project = "GitHub"
title = "GitHub REST API"
tags = ["git", "code"]

[[project]]
project = "OpenAI"
title = "OpenAI API"

[[recipe]]
id = "gh-search-repos"
title = "Search repositories"
project = "GitHub"
method = "GET"
auth = "bearer"

[[recipe]]
id = "oa-chat"
title = "Create chat completion"
project = "OpenAI"
method = "POST"
auth = "bearer"
docs_url = "https://platform.openai.com/docs/api-reference/authentication"

[[recipe]]
id = "gh-zen"
title = "Zen"
project = "GitHub"
method = "GET"
"#;

    async fn catalog() -> (TempDir, TomlRecipeCatalog) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG).unwrap();
        let catalog = TomlRecipeCatalog::load(path).await.unwrap();
        (temp_dir, catalog)
    }

    #[tokio::test]
    async fn test_find_recipe_by_id() {
        let (_dir, catalog) = catalog().await;
        let recipe = catalog.find_recipe("oa-chat").await.unwrap().unwrap();
        assert_eq!(recipe.method, HttpMethod::Post);
        assert_eq!(recipe.auth, Some(RecipeAuthType::Bearer));
        assert!(catalog.find_recipe("missing").await.unwrap().is_none());

        let zen = catalog.find_recipe("gh-zen").await.unwrap().unwrap();
        assert!(!zen.needs_auth());
    }

    #[tokio::test]
    async fn test_fuzzy_project_lookup() {
        let (_dir, catalog) = catalog().await;
        let project = catalog.find_project("github").await.unwrap().unwrap();
        assert_eq!(project.title, "GitHub REST API");
        assert_eq!(project.tags, vec!["git", "code"]);

        let recipes = catalog.recipes_for_project("hub").await.unwrap();
        let ids: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["gh-search-repos", "gh-zen"]);
    }

    #[tokio::test]
    async fn test_lookup_resolves_project() {
        let (_dir, catalog) = catalog().await;
        match RecipeLookup::resolve(&catalog, "gh-zen").await {
            RecipeLookup::Found { recipe, project } => {
                assert_eq!(recipe.title, "Zen");
                assert_eq!(project.project, "GitHub");
            }
            RecipeLookup::Unavailable => panic!("expected recipe to resolve"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = TomlRecipeCatalog::load(temp_dir.path().join("none.toml"))
            .await
            .unwrap();
        assert!(catalog.find_project("GitHub").await.unwrap().is_none());
    }
}
