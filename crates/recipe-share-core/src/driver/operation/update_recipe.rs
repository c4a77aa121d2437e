use super::*;

use crate::model::{RecipeChanges, RecipeId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecipe {
    pub id: RecipeId,

    /// The update only applies when the row's `user_id` equals this.
    pub owner: UserId,

    pub changes: RecipeChanges,
}

impl From<UpdateRecipe> for Operation {
    fn from(value: UpdateRecipe) -> Self {
        Self::UpdateRecipe(value)
    }
}
