mod direction;
pub use direction::Direction;

mod order_by;
pub use order_by::OrderBy;

mod profile_filter;
pub use profile_filter::ProfileFilter;

mod recipe_field;
pub use recipe_field::RecipeField;

mod recipe_filter;
pub use recipe_filter::RecipeFilter;

mod recipe_query;
pub use recipe_query::RecipeQuery;
