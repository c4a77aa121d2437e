use super::*;

use crate::stmt::RecipeQuery;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecipes {
    pub query: RecipeQuery,

    /// Embed the owner's profile in each row through the
    /// `recipes.user_id -> profiles.id` relationship.
    pub include_profile: bool,

    /// Expect exactly one row. No rows is reported as not found.
    pub single: bool,
}

impl QueryRecipes {
    pub fn joined(query: RecipeQuery) -> Self {
        QueryRecipes {
            query,
            include_profile: true,
            single: false,
        }
    }

    pub fn plain(query: RecipeQuery) -> Self {
        QueryRecipes {
            query,
            include_profile: false,
            single: false,
        }
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }
}

impl From<QueryRecipes> for Operation {
    fn from(value: QueryRecipes) -> Self {
        Self::QueryRecipes(value)
    }
}
