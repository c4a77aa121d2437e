use super::{Difficulty, EmbeddedProfile, RecipeId, UserId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,

    pub created_at: DateTime<Utc>,

    /// Owner. The column is required by the application but the foreign key
    /// may be missing, so reads tolerate `NULL`.
    pub user_id: Option<UserId>,

    pub title: String,

    /// One ingredient per line.
    pub ingredients: String,

    /// One step per line.
    pub instructions: String,

    /// Minutes.
    pub cooking_time: Option<i32>,

    pub difficulty: Option<Difficulty>,

    pub category: Option<String>,
}

impl Recipe {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.user_id.as_ref() == Some(user)
    }
}

/// A recipe row as returned by a driver, with whatever profile the store
/// embedded. Plain reads always carry [`EmbeddedProfile::Missing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRow {
    #[serde(flatten)]
    pub recipe: Recipe,

    #[serde(default)]
    pub profile: EmbeddedProfile,
}

impl From<Recipe> for RecipeRow {
    fn from(recipe: Recipe) -> Self {
        RecipeRow {
            recipe,
            profile: EmbeddedProfile::Missing,
        }
    }
}

/// A validated recipe ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecipe {
    pub user_id: UserId,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
}

/// Validated columns written by an edit. Every editable column is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeChanges {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
}

impl NewRecipe {
    /// Builds the stored row, assigning identity and creation time.
    pub fn into_recipe(self, id: RecipeId, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            created_at,
            user_id: Some(self.user_id),
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

impl RecipeChanges {
    pub fn apply_to(&self, recipe: &mut Recipe) {
        recipe.title = self.title.clone();
        recipe.ingredients = self.ingredients.clone();
        recipe.instructions = self.instructions.clone();
        recipe.cooking_time = self.cooking_time;
        recipe.difficulty = self.difficulty;
        recipe.category = self.category.clone();
    }
}
