use anyhow::Result;
use clap::Parser;
use recipe_share::{Caller, Db, ProfileInput, UserId};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
pub struct ProfileCommand {
    #[arg(long)]
    user: UserId,

    /// Sign-in e-mail; its local part becomes the username of a new profile
    #[arg(long)]
    email: Option<String>,

    /// New username
    #[arg(long)]
    username: Option<String>,

    /// New full name
    #[arg(long)]
    full_name: Option<String>,
}

impl ProfileCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<Value> {
        let mut caller = Caller::new(self.user);
        if let Some(email) = self.email {
            caller = caller.with_email(email);
        }

        let mut profile = db.get_or_create_profile(&caller).await?;

        if self.username.is_some() || self.full_name.is_some() {
            let input = ProfileInput {
                username: self.username.or(profile.username),
                full_name: self.full_name.or(profile.full_name),
            };
            profile = db.update_profile(&caller.id, input).await?;
        }

        let recipes = db.recipes_by(caller.id, None).await?;

        Ok(json!({
            "profile": profile,
            "display_name": profile.display_name(),
            "initial": profile.initial(),
            "recipes": crate::recipe::cards(&recipes),
        }))
    }
}
