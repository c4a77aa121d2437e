use anyhow::Result;
use clap::Parser;
use recipe_share::Db;
use recipe_share_cli::Cli;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = Db::builder().config(cli.config()?).connect().await?;

    let output = cli.run(&db).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
