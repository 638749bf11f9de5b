//! Recipe catalog (hosted data source) interface.
//!
//! The catalog is read-only from this crate's point of view. Records are
//! consumed as fetched; only presence is checked.

mod model;

pub use model::{ForkRequest, Project, Recipe};

use crate::error::Result;
use async_trait::async_trait;

/// Read-only lookups of projects and recipes.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Finds a recipe by exact id.
    async fn find_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>>;

    /// Finds the first project whose name contains `name`, ignoring case.
    async fn find_project(&self, name: &str) -> Result<Option<Project>>;

    /// Lists recipes whose project name contains `name`, ignoring case.
    async fn recipes_for_project(&self, name: &str) -> Result<Vec<Recipe>>;
}

/// Outcome of resolving a recipe page for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeLookup {
    Found { recipe: Recipe, project: Project },
    /// The recipe or its project is missing, or the source failed.
    Unavailable,
}

impl RecipeLookup {
    /// Resolves a recipe and its project.
    ///
    /// Fetch failures are folded into `Unavailable` so the caller can show
    /// a "not found / no access" state instead of failing.
    pub async fn resolve(catalog: &dyn RecipeCatalog, recipe_id: &str) -> Self {
        let recipe = match catalog.find_recipe(recipe_id).await {
            Ok(Some(recipe)) => recipe,
            _ => return Self::Unavailable,
        };

        match catalog.find_project(&recipe.project).await {
            Ok(Some(project)) => Self::Found { recipe, project },
            _ => Self::Unavailable,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Case-insensitive substring match used for fuzzy project lookups.
pub fn name_matches(candidate: &str, query: &str) -> bool {
    candidate.to_lowercase().contains(&query.to_lowercase())
}
