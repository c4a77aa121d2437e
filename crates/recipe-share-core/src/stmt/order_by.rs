use super::{Direction, RecipeField};
use crate::model::Recipe;

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: RecipeField,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: RecipeField) -> Self {
        OrderBy {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: RecipeField) -> Self {
        OrderBy {
            field,
            direction: Direction::Desc,
        }
    }

    /// Compares two recipes the way the store orders them. `NULL`s sort last
    /// ascending and first descending, as in PostgreSQL.
    pub fn compare(&self, lhs: &Recipe, rhs: &Recipe) -> Ordering {
        fn nulls_last<T: Ord>(lhs: Option<T>, rhs: Option<T>) -> Ordering {
            match (lhs, rhs) {
                (Some(l), Some(r)) => l.cmp(&r),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        let ordering = match self.field {
            RecipeField::Id => lhs.id.cmp(&rhs.id),
            RecipeField::UserId => nulls_last(lhs.user_id, rhs.user_id),
            RecipeField::Title => lhs.title.cmp(&rhs.title),
            RecipeField::CookingTime => nulls_last(lhs.cooking_time, rhs.cooking_time),
            RecipeField::Difficulty => nulls_last(
                lhs.difficulty.map(|d| d.as_str()),
                rhs.difficulty.map(|d| d.as_str()),
            ),
            RecipeField::Category => {
                nulls_last(lhs.category.as_deref(), rhs.category.as_deref())
            }
            RecipeField::CreatedAt => lhs.created_at.cmp(&rhs.created_at),
        };

        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}
