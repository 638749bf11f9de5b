use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "recipe")]
#[command(about = "Recipe playground - local sessions, folders and API credentials", long_about = None)]
struct Cli {
    /// Data directory (defaults to the platform config directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage open request sessions
    Sessions {
        #[command(subcommand)]
        action: commands::sessions::SessionAction,
    },
    /// Manage sidebar folders
    Folders {
        #[command(subcommand)]
        action: commands::folders::FolderAction,
    },
    /// Manage per-recipe auth settings and secrets
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse the local recipe catalog
    Recipes {
        #[command(subcommand)]
        action: commands::recipes::RecipeAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = AppContext::resolve(cli.data_dir)?;
    commands::logging::init(&context.config.log_filter);
    tracing::debug!("[Cli] Data directory: {}", context.paths.base_dir().display());

    match cli.command {
        Commands::Sessions { action } => commands::sessions::run(&context, action).await?,
        Commands::Folders { action } => commands::folders::run(&context, action).await?,
        Commands::Auth { action } => commands::auth::run(&context, action).await?,
        Commands::Recipes { action } => commands::recipes::run(&context, action).await?,
    }

    Ok(())
}
