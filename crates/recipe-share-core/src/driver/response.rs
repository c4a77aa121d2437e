use crate::{
    model::{Profile, RecipeRow},
    Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Recipe rows, in store order
    Recipes(Vec<RecipeRow>),

    /// Profile rows, in store order
    Profiles(Vec<Profile>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn recipes(rows: impl IntoIterator<Item = impl Into<RecipeRow>>) -> Self {
        Self {
            rows: Rows::Recipes(rows.into_iter().map(Into::into).collect()),
        }
    }

    pub fn profiles(rows: impl IntoIterator<Item = Profile>) -> Self {
        Self {
            rows: Rows::Profiles(rows.into_iter().collect()),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        self.rows.into_count()
    }

    pub fn into_recipes(self) -> Result<Vec<RecipeRow>> {
        self.rows.into_recipes()
    }

    pub fn into_profiles(self) -> Result<Vec<Profile>> {
        self.rows.into_profiles()
    }
}

impl Rows {
    pub fn len(&self) -> usize {
        match self {
            Rows::Count(count) => *count as usize,
            Rows::Recipes(rows) => rows.len(),
            Rows::Profiles(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            Rows::Count(_) => "count",
            Rows::Recipes(_) => "recipes",
            Rows::Profiles(_) => "profiles",
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            other => Err(Error::invalid_result(format!(
                "expected count, got {}",
                other.kind()
            ))),
        }
    }

    pub fn into_recipes(self) -> Result<Vec<RecipeRow>> {
        match self {
            Rows::Recipes(rows) => Ok(rows),
            other => Err(Error::invalid_result(format!(
                "expected recipes, got {}",
                other.kind()
            ))),
        }
    }

    pub fn into_profiles(self) -> Result<Vec<Profile>> {
        match self {
            Rows::Profiles(rows) => Ok(rows),
            other => Err(Error::invalid_result(format!(
                "expected profiles, got {}",
                other.kind()
            ))),
        }
    }
}
