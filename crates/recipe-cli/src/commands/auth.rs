use super::context::AppContext;
use anyhow::Result;
use clap::Subcommand;
use recipe_core::auth::{AuthConfig, RecipeAuthType};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Show auth settings for a recipe
    Show {
        recipe_id: String,
        /// Print the secret instead of masking it
        #[arg(long)]
        reveal: bool,
    },
    /// Save auth settings and optionally the secret
    Set {
        recipe_id: String,
        #[arg(long = "type")]
        auth_type: RecipeAuthType,
        /// Header or query parameter carrying the secret
        #[arg(long)]
        meta: Option<String>,
        #[arg(long)]
        docs: Option<String>,
        #[arg(long)]
        secret: Option<String>,
    },
    /// Remove auth settings and secret
    Clear { recipe_id: String },
}

pub async fn run(context: &AppContext, action: AuthAction) -> Result<()> {
    let auth = context.auth();

    match action {
        AuthAction::Show { recipe_id, reveal } => {
            let credentials = auth.credentials(&recipe_id).await?;
            match &credentials.config {
                Some(config) => {
                    println!("type:   {}", config.auth_type);
                    if let Some(meta) = &config.meta {
                        println!("meta:   {}", meta);
                    }
                    if let Some(docs) = &config.docs {
                        println!("docs:   {}", docs);
                    }
                }
                None => println!("No auth settings for {}", recipe_id),
            }
            match credentials.secret.as_deref() {
                Some(secret) if reveal => println!("secret: {}", secret),
                Some(secret) => println!("secret: {}", mask(secret)),
                None => println!("secret: (not set)"),
            }
        }
        AuthAction::Set {
            recipe_id,
            auth_type,
            meta,
            docs,
            secret,
        } => {
            let config = AuthConfig {
                auth_type,
                meta,
                docs,
            };
            auth.save(&recipe_id, config, secret.as_deref()).await?;
            println!("✅ Saved auth settings for {}", recipe_id);
        }
        AuthAction::Clear { recipe_id } => {
            auth.clear(&recipe_id).await?;
            println!("Cleared auth settings for {}", recipe_id);
        }
    }

    Ok(())
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}{}", visible, "*".repeat(secret.chars().count().saturating_sub(4).min(12)))
}
