/// Recipe columns that can be filtered or ordered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    Id,
    UserId,
    Title,
    CookingTime,
    Difficulty,
    Category,
    CreatedAt,
}

impl RecipeField {
    pub fn column(&self) -> &'static str {
        match self {
            RecipeField::Id => "id",
            RecipeField::UserId => "user_id",
            RecipeField::Title => "title",
            RecipeField::CookingTime => "cooking_time",
            RecipeField::Difficulty => "difficulty",
            RecipeField::Category => "category",
            RecipeField::CreatedAt => "created_at",
        }
    }
}
