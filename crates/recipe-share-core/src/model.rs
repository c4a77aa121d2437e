mod category;
pub use category::Category;

mod difficulty;
pub use difficulty::Difficulty;

mod embedded_profile;
pub use embedded_profile::EmbeddedProfile;

mod id;
pub use id::{RecipeId, UserId};

mod profile;
pub use profile::{NewProfile, Profile, ProfileChanges};

mod recipe;
pub use recipe::{NewRecipe, Recipe, RecipeChanges, RecipeRow};

mod recipe_with_profile;
pub use recipe_with_profile::{RecipeCard, RecipeWithProfile};
