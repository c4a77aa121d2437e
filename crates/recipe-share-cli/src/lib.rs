mod profile;
mod recipe;
mod setup;

pub use profile::ProfileCommand;
pub use recipe::{CreateCommand, DashboardCommand, DeleteCommand, ShowCommand};
pub use setup::SetupCommand;

use anyhow::Result;
use clap::Parser;
use recipe_share::{config::ENV_URL, Config, Db};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "recipe-share")]
#[command(about = "Browse and publish recipes")]
#[command(version)]
pub struct Cli {
    /// Store URL; overrides RECIPE_SHARE_URL
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// List the newest recipes
    Dashboard(DashboardCommand),

    /// Show one recipe with its author
    Show(ShowCommand),

    /// Publish a recipe
    Create(CreateCommand),

    /// Delete one of your recipes
    Delete(DeleteCommand),

    /// Show, create or edit your profile
    Profile(ProfileCommand),

    /// Create the store's tables
    Setup(SetupCommand),
}

impl Cli {
    /// Store configuration from the environment, with `--url` taking
    /// precedence.
    pub fn config(&self) -> Result<Config> {
        let config = Config::from_lookup(|key| match (&self.url, key) {
            (Some(url), ENV_URL) => Some(url.clone()),
            _ => std::env::var(key).ok(),
        })?;
        Ok(config)
    }

    /// Runs the command and returns its JSON output.
    pub async fn run(self, db: &Db) -> Result<Value> {
        match self.command {
            Command::Dashboard(cmd) => cmd.run(db).await,
            Command::Show(cmd) => cmd.run(db).await,
            Command::Create(cmd) => cmd.run(db).await,
            Command::Delete(cmd) => cmd.run(db).await,
            Command::Profile(cmd) => cmd.run(db).await,
            Command::Setup(cmd) => cmd.run(db).await,
        }
    }
}
