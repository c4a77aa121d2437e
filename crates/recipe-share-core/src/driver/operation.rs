mod delete_recipe;
pub use delete_recipe::DeleteRecipe;

mod insert_profile;
pub use insert_profile::InsertProfile;

mod insert_recipe;
pub use insert_recipe::InsertRecipe;

mod query_profiles;
pub use query_profiles::QueryProfiles;

mod query_recipes;
pub use query_recipes::QueryRecipes;

mod update_profile;
pub use update_profile::UpdateProfile;

mod update_recipe;
pub use update_recipe::UpdateRecipe;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read recipes, optionally embedding each owner's profile
    QueryRecipes(QueryRecipes),

    /// Read profiles
    QueryProfiles(QueryProfiles),

    /// Create a recipe and return the stored row
    InsertRecipe(InsertRecipe),

    /// Edit a recipe owned by the given user and return the stored row
    UpdateRecipe(UpdateRecipe),

    /// Delete a recipe owned by the given user, returning the affected count
    DeleteRecipe(DeleteRecipe),

    /// Create a profile and return the stored row
    InsertProfile(InsertProfile),

    /// Edit a profile and return the stored row
    UpdateProfile(UpdateProfile),
}

impl Operation {
    pub fn is_query_recipes(&self) -> bool {
        matches!(self, Operation::QueryRecipes(_))
    }

    /// A recipe read that asks the store to embed profiles.
    pub fn is_joined_read(&self) -> bool {
        matches!(self, Operation::QueryRecipes(op) if op.include_profile)
    }

    /// A recipe read without a join.
    pub fn is_plain_read(&self) -> bool {
        matches!(self, Operation::QueryRecipes(op) if !op.include_profile)
    }

    pub fn is_query_profiles(&self) -> bool {
        matches!(self, Operation::QueryProfiles(_))
    }

    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Operation::QueryRecipes(_) | Operation::QueryProfiles(_)
        )
    }
}
