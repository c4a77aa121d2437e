use crate::Value;

use recipe_share_core::{
    model::{NewProfile, NewRecipe, ProfileChanges, RecipeChanges, RecipeId, UserId},
    stmt::{ProfileFilter, RecipeFilter, RecipeQuery},
};
use tokio_postgres::types::ToSql;

pub(crate) const RECIPE_COLUMNS: &str =
    "id, created_at, user_id, title, ingredients, instructions, cooking_time, difficulty, category";

pub(crate) const PROFILE_COLUMNS: &str = "id, username, full_name, created_at, updated_at";

/// Profile columns of a joined read, prefixed so they do not collide with the
/// recipe's.
pub(crate) const PROFILE_PREFIX: &str = "profile_";

pub(crate) const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS profiles (
    id uuid PRIMARY KEY,
    username text UNIQUE,
    full_name text,
    created_at timestamptz NOT NULL DEFAULT now(),
    updated_at timestamptz NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS recipes (
    id uuid PRIMARY KEY,
    created_at timestamptz NOT NULL DEFAULT now(),
    user_id uuid,
    title text NOT NULL,
    ingredients text NOT NULL,
    instructions text NOT NULL,
    cooking_time integer,
    difficulty text,
    category text
);

CREATE INDEX IF NOT EXISTS recipes_created_at_idx ON recipes (created_at DESC);
";

pub(crate) const DROP_TABLES: &str = "
DROP TABLE IF EXISTS recipes;
DROP TABLE IF EXISTS profiles;
";

/// SQL text with its positional parameters.
#[derive(Debug, Default)]
pub(crate) struct Statement {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

impl Statement {
    /// Binds `value` and returns its placeholder.
    fn bind(&mut self, value: impl Into<Value>) -> String {
        self.params.push(value.into());
        format!("${}", self.params.len())
    }

    pub(crate) fn args(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect()
    }
}

pub(crate) fn select_recipes(query: &RecipeQuery, include_profile: bool) -> Statement {
    let mut stmt = Statement::default();

    let columns = RECIPE_COLUMNS
        .split(", ")
        .map(|column| format!("r.{column}"))
        .collect::<Vec<_>>()
        .join(", ");

    stmt.sql = format!("SELECT {columns}");

    if include_profile {
        for column in PROFILE_COLUMNS.split(", ") {
            stmt.sql += &format!(", p.{column} AS {PROFILE_PREFIX}{column}");
        }
        stmt.sql += " FROM recipes r LEFT JOIN profiles p ON p.id = r.user_id";
    } else {
        stmt.sql += " FROM recipes r";
    }

    let mut predicates = vec![];
    for filter in &query.filter {
        let placeholder = match filter {
            RecipeFilter::Id(id) => stmt.bind(*id.as_uuid()),
            RecipeFilter::UserId(id) => stmt.bind(*id.as_uuid()),
            RecipeFilter::Difficulty(difficulty) => stmt.bind(difficulty.as_str().to_string()),
            RecipeFilter::Category(category) => stmt.bind(category.clone()),
        };
        predicates.push(format!("r.{} = {placeholder}", filter.field().column()));
    }

    if !predicates.is_empty() {
        stmt.sql += &format!(" WHERE {}", predicates.join(" AND "));
    }

    if let Some(order_by) = &query.order_by {
        stmt.sql += &format!(
            " ORDER BY r.{} {}",
            order_by.field.column(),
            order_by.direction.as_sql()
        );
    }

    if let Some(limit) = query.limit {
        stmt.sql += &format!(" LIMIT {limit}");
    }

    stmt
}

pub(crate) fn select_profiles(filter: &ProfileFilter) -> Statement {
    let mut stmt = Statement::default();

    let predicate = match filter {
        ProfileFilter::Id(id) => format!("id = {}", stmt.bind(*id.as_uuid())),
        ProfileFilter::IdIn(ids) => {
            let ids = ids.iter().map(|id| *id.as_uuid()).collect();
            format!("id = ANY({})", stmt.bind(Value::UuidList(ids)))
        }
        ProfileFilter::Username(username) => {
            format!("username = {}", stmt.bind(username.clone()))
        }
    };

    stmt.sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE {predicate}");
    stmt
}

pub(crate) fn insert_recipe(id: RecipeId, recipe: &NewRecipe) -> Statement {
    let mut stmt = Statement::default();
    let values = [
        stmt.bind(*id.as_uuid()),
        stmt.bind(*recipe.user_id.as_uuid()),
        stmt.bind(recipe.title.clone()),
        stmt.bind(recipe.ingredients.clone()),
        stmt.bind(recipe.instructions.clone()),
        stmt.bind(recipe.cooking_time),
        stmt.bind(recipe.difficulty.map(|d| d.as_str().to_string())),
        stmt.bind(recipe.category.clone()),
    ];

    stmt.sql = format!(
        "INSERT INTO recipes (id, user_id, title, ingredients, instructions, cooking_time, difficulty, category) \
         VALUES ({}) RETURNING {RECIPE_COLUMNS}",
        values.join(", ")
    );
    stmt
}

pub(crate) fn update_recipe(id: RecipeId, owner: UserId, changes: &RecipeChanges) -> Statement {
    let mut stmt = Statement::default();
    let id = stmt.bind(*id.as_uuid());
    let owner = stmt.bind(*owner.as_uuid());

    let assignments = [
        format!("title = {}", stmt.bind(changes.title.clone())),
        format!("ingredients = {}", stmt.bind(changes.ingredients.clone())),
        format!("instructions = {}", stmt.bind(changes.instructions.clone())),
        format!("cooking_time = {}", stmt.bind(changes.cooking_time)),
        format!(
            "difficulty = {}",
            stmt.bind(changes.difficulty.map(|d| d.as_str().to_string()))
        ),
        format!("category = {}", stmt.bind(changes.category.clone())),
    ];

    stmt.sql = format!(
        "UPDATE recipes SET {} WHERE id = {id} AND user_id = {owner} RETURNING {RECIPE_COLUMNS}",
        assignments.join(", ")
    );
    stmt
}

pub(crate) fn delete_recipe(id: RecipeId, owner: UserId) -> Statement {
    let mut stmt = Statement::default();
    let id = stmt.bind(*id.as_uuid());
    let owner = stmt.bind(*owner.as_uuid());
    stmt.sql = format!("DELETE FROM recipes WHERE id = {id} AND user_id = {owner}");
    stmt
}

pub(crate) fn insert_profile(profile: &NewProfile) -> Statement {
    let mut stmt = Statement::default();
    let id = stmt.bind(*profile.id.as_uuid());
    let username = stmt.bind(profile.username.clone());
    let full_name = stmt.bind(profile.full_name.clone());
    stmt.sql = format!(
        "INSERT INTO profiles (id, username, full_name) VALUES ({id}, {username}, {full_name}) \
         RETURNING {PROFILE_COLUMNS}"
    );
    stmt
}

pub(crate) fn update_profile(id: UserId, changes: &ProfileChanges) -> Statement {
    let mut stmt = Statement::default();
    let id = stmt.bind(*id.as_uuid());
    let username = stmt.bind(changes.username.clone());
    let full_name = stmt.bind(changes.full_name.clone());
    stmt.sql = format!(
        "UPDATE profiles SET username = {username}, full_name = {full_name}, updated_at = now() \
         WHERE id = {id} RETURNING {PROFILE_COLUMNS}"
    );
    stmt
}
