use super::RecipeField;
use crate::model::{Difficulty, Recipe, RecipeId, UserId};

/// An equality predicate on a recipe column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeFilter {
    Id(RecipeId),
    UserId(UserId),
    Difficulty(Difficulty),
    Category(String),
}

impl RecipeFilter {
    pub fn field(&self) -> RecipeField {
        match self {
            RecipeFilter::Id(_) => RecipeField::Id,
            RecipeFilter::UserId(_) => RecipeField::UserId,
            RecipeFilter::Difficulty(_) => RecipeField::Difficulty,
            RecipeFilter::Category(_) => RecipeField::Category,
        }
    }

    /// The compared value rendered as text, for drivers that bind every
    /// parameter as a string.
    pub fn value_text(&self) -> String {
        match self {
            RecipeFilter::Id(id) => id.to_string(),
            RecipeFilter::UserId(id) => id.to_string(),
            RecipeFilter::Difficulty(difficulty) => difficulty.as_str().to_string(),
            RecipeFilter::Category(category) => category.clone(),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            RecipeFilter::Id(id) => recipe.id == *id,
            RecipeFilter::UserId(id) => recipe.user_id.as_ref() == Some(id),
            RecipeFilter::Difficulty(difficulty) => recipe.difficulty.as_ref() == Some(difficulty),
            RecipeFilter::Category(category) => recipe.category.as_ref() == Some(category),
        }
    }
}
