use super::{Category, Profile, Recipe, UserId};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recipe with its owner's profile embedded by value. Built at read time
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeWithProfile {
    #[serde(flatten)]
    pub recipe: Recipe,

    pub profile: Option<Profile>,
}

impl RecipeWithProfile {
    pub fn new(recipe: Recipe, profile: Option<Profile>) -> Self {
        RecipeWithProfile { recipe, profile }
    }

    /// Author label: username, then full name, then "anonymous".
    pub fn author_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(Profile::author_name)
            .unwrap_or("익명")
    }

    /// Whether `user` may edit or delete this recipe.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.recipe.is_owned_by(user)
    }

    pub fn card(&self) -> RecipeCard {
        let recipe = &self.recipe;
        RecipeCard {
            id: recipe.id.to_string(),
            title: recipe.title.clone(),
            author: self.author_name().to_string(),
            time: match recipe.cooking_time {
                Some(minutes) => format!("{minutes}분"),
                None => "시간 미정".to_string(),
            },
            difficulty: recipe
                .difficulty
                .map(|d| d.as_str())
                .unwrap_or("보통")
                .to_string(),
            category: recipe
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "기타".to_string()),
            icon: Category::icon_for(recipe.category.as_deref()),
            created_at: recipe.created_at,
        }
    }
}

/// Display summary of a recipe for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub id: String,
    pub title: String,
    pub author: String,
    pub time: String,
    pub difficulty: String,
    pub category: String,
    pub icon: &'static str,
    pub created_at: DateTime<Utc>,
}
