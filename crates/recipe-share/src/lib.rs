pub mod config;
pub use config::Config;

pub mod db;
pub use db::Db;

pub mod profile;
pub use profile::{Caller, ProfileInput};

pub mod recipe;
pub use recipe::RecipeInput;

pub mod resolve;
pub use resolve::ProfileJoinResolver;

pub use recipe_share_core::{
    driver::{self, Driver},
    model::{
        self, Category, Difficulty, Profile, Recipe, RecipeCard, RecipeId, RecipeWithProfile,
        UserId,
    },
    stmt, Error, Result,
};
