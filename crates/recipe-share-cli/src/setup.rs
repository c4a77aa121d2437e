use anyhow::Result;
use clap::Parser;
use recipe_share::Db;
use serde_json::{json, Value};

#[derive(Parser, Debug)]
pub struct SetupCommand {
    /// Drop every recipe and profile first
    #[arg(long)]
    reset: bool,
}

impl SetupCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<Value> {
        if self.reset {
            db.reset_db().await?;
        } else {
            db.push_schema().await?;
        }

        Ok(json!({
            "driver": db.driver().name(),
            "reset": self.reset,
        }))
    }
}
