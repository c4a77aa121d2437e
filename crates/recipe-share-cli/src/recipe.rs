use anyhow::Result;
use clap::Parser;
use recipe_share::{Db, RecipeId, RecipeInput, RecipeWithProfile, UserId};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
pub struct DashboardCommand {
    /// Number of recipes; defaults to RECIPE_SHARE_PAGE_SIZE
    #[arg(long)]
    limit: Option<usize>,

    /// Only recipes written by this user
    #[arg(long)]
    user: Option<UserId>,
}

impl DashboardCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<Value> {
        let recipes = match self.user {
            Some(user) => db.recipes_by(user, self.limit).await?,
            None => db.dashboard(self.limit).await?,
        };

        tracing::debug!(count = recipes.len(), "dashboard loaded");
        Ok(cards(&recipes))
    }
}

#[derive(Parser, Debug)]
pub struct ShowCommand {
    id: RecipeId,
}

impl ShowCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<Value> {
        let recipe = db.recipe_detail(self.id).await?;

        let mut value = serde_json::to_value(&recipe)?;
        value["author"] = json!(recipe.author_name());
        value["card"] = serde_json::to_value(recipe.card())?;
        Ok(value)
    }
}

#[derive(Parser, Debug)]
pub struct CreateCommand {
    /// Author
    #[arg(long)]
    user: UserId,

    #[arg(long)]
    title: String,

    /// One ingredient per line
    #[arg(long)]
    ingredients: String,

    /// One step per line
    #[arg(long)]
    instructions: String,

    /// Minutes
    #[arg(long)]
    cooking_time: Option<i32>,

    /// 쉬움, 보통 or 어려움
    #[arg(long)]
    difficulty: Option<String>,

    #[arg(long)]
    category: Option<String>,
}

impl CreateCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<Value> {
        let input = RecipeInput {
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
            category: self.category,
        };

        let recipe = db.create_recipe(&self.user, input).await?;
        Ok(serde_json::to_value(recipe)?)
    }
}

#[derive(Parser, Debug)]
pub struct DeleteCommand {
    /// Owner of the recipe
    #[arg(long)]
    user: UserId,

    id: RecipeId,
}

impl DeleteCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<Value> {
        db.delete_recipe(&self.user, self.id).await?;
        Ok(json!({ "deleted": self.id }))
    }
}

pub(crate) fn cards(recipes: &[RecipeWithProfile]) -> Value {
    Value::Array(
        recipes
            .iter()
            .map(|recipe| json!(recipe.card()))
            .collect(),
    )
}
