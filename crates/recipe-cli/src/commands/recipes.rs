use super::context::AppContext;
use anyhow::{bail, Result};
use clap::Subcommand;
use recipe_core::catalog::{ForkRequest, RecipeCatalog, RecipeLookup};

#[derive(Subcommand)]
pub enum RecipeAction {
    /// Show a recipe with its project
    Show { id: String },
    /// List the recipes of a project (name match ignores case)
    Project { name: String },
    /// Start a session from a recipe, given as `<id>` or `<id>::<title>`
    Fork { request: String },
}

pub async fn run(context: &AppContext, action: RecipeAction) -> Result<()> {
    let catalog = context.catalog().await?;

    match action {
        RecipeAction::Show { id } => match RecipeLookup::resolve(&catalog, &id).await {
            RecipeLookup::Found { recipe, project } => {
                println!("{} {}", recipe.method, recipe.title);
                println!("project: {} ({})", project.title, project.project);
                if let Some(summary) = &recipe.summary {
                    println!("{}", summary);
                }
                if let Some(auth) = recipe.auth {
                    println!("auth:    {}", auth);
                }
                if let Some(docs) = &recipe.docs_url {
                    println!("docs:    {}", docs);
                }
            }
            RecipeLookup::Unavailable => {
                bail!("Unable to fetch recipe details. The recipe may not exist or you may not have access.")
            }
        },
        RecipeAction::Project { name } => {
            let Some(project) = catalog.find_project(&name).await? else {
                bail!("No project matching '{}'", name);
            };
            println!("{} ({})", project.title, project.project);
            for recipe in catalog.recipes_for_project(&project.project).await? {
                println!("  {:<7} {}  ({})", recipe.method, recipe.title, recipe.id);
            }
        }
        RecipeAction::Fork { request } => {
            let Some(request) = ForkRequest::parse(&request) else {
                bail!("Fork request needs a recipe id");
            };
            let Some(mut recipe) = catalog.find_recipe(&request.recipe_id).await? else {
                bail!("No recipe with id {}", request.recipe_id);
            };
            if let Some(title) = request.title {
                recipe.title = title;
            }

            let mut store = context.store().await?;
            let session = store.fork_recipe(&recipe).persisted().await?;
            println!("Created session {} ({})", session.display_name(), session.id);
        }
    }

    Ok(())
}
