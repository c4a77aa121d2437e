use crate::{
    driver::operation::{DeleteRecipe, InsertRecipe, QueryRecipes, UpdateRecipe},
    model::{Category, Difficulty, NewRecipe, Recipe, RecipeChanges, RecipeId, RecipeWithProfile, UserId},
    stmt::RecipeQuery,
    Db, Error, Result,
};

use serde::Deserialize;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Recipe fields as submitted by the recipe form.
///
/// Text is trimmed; optional fields left empty are stored as `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecipeInput {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,

    /// Minutes; at least 1 when given.
    pub cooking_time: Option<i32>,

    /// One of `쉬움`, `보통`, `어려움`.
    pub difficulty: Option<String>,

    /// One of the fixed [`Category`] labels.
    pub category: Option<String>,
}

impl RecipeInput {
    /// Checks the input and returns the columns to write.
    pub fn validate(&self) -> Result<RecipeChanges> {
        let title = required("title", &self.title)?;
        let title_len = title.chars().count();
        if title_len > TITLE_MAX_CHARS {
            return Err(Error::validation_too_long("title", title_len, TITLE_MAX_CHARS));
        }

        let ingredients = required("ingredients", &self.ingredients)?;
        let instructions = required("instructions", &self.instructions)?;

        if let Some(minutes) = self.cooking_time {
            if minutes < 1 {
                return Err(Error::validation_invalid(
                    "cooking_time",
                    format!("must be at least 1 minute; got {minutes}"),
                ));
            }
        }

        let difficulty = optional(&self.difficulty)
            .map(str::parse::<Difficulty>)
            .transpose()?;

        let category = optional(&self.category)
            .map(str::parse::<Category>)
            .transpose()?
            .map(|category| category.as_str().to_string());

        Ok(RecipeChanges {
            title,
            ingredients,
            instructions,
            cooking_time: self.cooking_time,
            difficulty,
            category,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation_required(field));
    }
    Ok(value.to_string())
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Db {
    /// Newest recipes first, with authors. Uses the configured page size when
    /// `limit` is `None`.
    pub async fn dashboard(&self, limit: Option<usize>) -> Result<Vec<RecipeWithProfile>> {
        let limit = limit.unwrap_or(self.config().page_size);
        self.resolver().fetch_many(RecipeQuery::latest(limit)).await
    }

    /// Newest recipes written by `owner`, with authors.
    pub async fn recipes_by(
        &self,
        owner: UserId,
        limit: Option<usize>,
    ) -> Result<Vec<RecipeWithProfile>> {
        let limit = limit.unwrap_or(self.config().page_size);
        self.resolver()
            .fetch_many(RecipeQuery::latest(limit).owned_by(owner))
            .await
    }

    /// One recipe with its author, for the detail page.
    pub async fn recipe_detail(&self, id: RecipeId) -> Result<RecipeWithProfile> {
        self.resolver().fetch_one(id).await
    }

    /// Loads a recipe its owner is about to edit.
    ///
    /// Fails with not found when the recipe does not exist and with forbidden
    /// when `caller` does not own it.
    pub async fn recipe_for_edit(&self, caller: &UserId, id: RecipeId) -> Result<Recipe> {
        let recipe = self
            .exec(QueryRecipes::plain(RecipeQuery::by_id(id)).single())
            .await?
            .into_recipes()?
            .into_iter()
            .next()
            .map(|row| row.recipe)
            .ok_or_else(|| Error::record_not_found(format!("recipes id={id}")))?;

        if !recipe.is_owned_by(caller) {
            return Err(Error::forbidden(format!(
                "recipe {id} is owned by another user"
            )));
        }

        Ok(recipe)
    }

    /// Publishes a new recipe owned by `caller`.
    pub async fn create_recipe(&self, caller: &UserId, input: RecipeInput) -> Result<Recipe> {
        let changes = input.validate()?;

        let recipe = NewRecipe {
            user_id: *caller,
            title: changes.title,
            ingredients: changes.ingredients,
            instructions: changes.instructions,
            cooking_time: changes.cooking_time,
            difficulty: changes.difficulty,
            category: changes.category,
        };

        let created = self
            .exec(InsertRecipe { recipe })
            .await?
            .into_recipes()?
            .into_iter()
            .next()
            .map(|row| row.recipe)
            .ok_or_else(|| Error::invalid_result("insert returned no recipe"))?;

        tracing::info!(id = %created.id, owner = %caller, "recipe created");
        Ok(created)
    }

    /// Replaces the editable fields of a recipe `caller` owns.
    pub async fn update_recipe(
        &self,
        caller: &UserId,
        id: RecipeId,
        input: RecipeInput,
    ) -> Result<Recipe> {
        let changes = input.validate()?;
        self.recipe_for_edit(caller, id).await?;

        let updated = self
            .exec(UpdateRecipe {
                id,
                owner: *caller,
                changes,
            })
            .await?
            .into_recipes()?
            .into_iter()
            .next()
            .map(|row| row.recipe)
            // Deleted between the ownership check and the update
            .ok_or_else(|| Error::record_not_found(format!("recipes id={id}")))?;

        tracing::info!(%id, owner = %caller, "recipe updated");
        Ok(updated)
    }

    /// Deletes a recipe `caller` owns.
    ///
    /// A recipe that does not exist and one owned by someone else are
    /// indistinguishable here; both are reported as not found.
    pub async fn delete_recipe(&self, caller: &UserId, id: RecipeId) -> Result<()> {
        let deleted = self
            .exec(DeleteRecipe { id, owner: *caller })
            .await?
            .into_count()?;

        if deleted == 0 {
            return Err(Error::record_not_found(format!(
                "recipes id={id} owned by {caller}"
            )));
        }

        tracing::info!(%id, owner = %caller, "recipe deleted");
        Ok(())
    }
}
