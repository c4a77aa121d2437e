use super::{OrderBy, RecipeField, RecipeFilter};
use crate::model::{Recipe, RecipeId, UserId};

/// Filter, ordering and limit for a recipe read.
///
/// The same query is sent for the joined attempt and, unchanged, for the
/// plain fallback read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    /// All predicates must hold.
    pub filter: Vec<RecipeFilter>,

    pub order_by: Option<OrderBy>,

    pub limit: Option<usize>,
}

impl RecipeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query matching a single recipe by identity.
    pub fn by_id(id: RecipeId) -> Self {
        Self::new().filter(RecipeFilter::Id(id))
    }

    /// Newest recipes first.
    pub fn latest(limit: usize) -> Self {
        Self::new()
            .order_by(OrderBy::desc(RecipeField::CreatedAt))
            .limit(limit)
    }

    pub fn filter(mut self, filter: RecipeFilter) -> Self {
        self.filter.push(filter);
        self
    }

    pub fn owned_by(self, user: UserId) -> Self {
        self.filter(RecipeFilter::UserId(user))
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.filter.iter().all(|filter| filter.matches(recipe))
    }

    /// Applies the query to an in-memory set of rows.
    pub fn apply(&self, rows: impl IntoIterator<Item = Recipe>) -> Vec<Recipe> {
        let mut rows: Vec<_> = rows.into_iter().filter(|r| self.matches(r)).collect();

        if let Some(order_by) = &self.order_by {
            // Stable, so ties keep insertion order
            rows.sort_by(|lhs, rhs| order_by.compare(lhs, rhs));
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        rows
    }
}
