use super::*;

use crate::model::NewRecipe;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertRecipe {
    pub recipe: NewRecipe,
}

impl From<InsertRecipe> for Operation {
    fn from(value: InsertRecipe) -> Self {
        Self::InsertRecipe(value)
    }
}
