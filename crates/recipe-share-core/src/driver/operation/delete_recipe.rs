use super::*;

use crate::model::{RecipeId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRecipe {
    pub id: RecipeId,

    /// The delete only applies when the row's `user_id` equals this.
    pub owner: UserId,
}

impl From<DeleteRecipe> for Operation {
    fn from(value: DeleteRecipe) -> Self {
        Self::DeleteRecipe(value)
    }
}
