//! An in-process recipe store.
//!
//! Behaves like the hosted store for every operation, including the error
//! codes it reports. Two knobs reproduce the hosted store's join behaviour:
//! joins can be disabled, in which case joined reads fail with `PGRST200`,
//! and the embedded profile can be sent as an object or as a one-element
//! list.

use chrono::Utc;
use recipe_share_core::{
    async_trait,
    driver::{
        operation::{
            DeleteRecipe, InsertProfile, InsertRecipe, QueryProfiles, QueryRecipes,
            UpdateProfile, UpdateRecipe,
        },
        Operation, Response,
    },
    model::{EmbeddedProfile, Profile, Recipe, RecipeId, RecipeRow},
    Driver, Error, Result,
};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Code the hosted store reports when it cannot resolve a relationship.
pub const JOIN_UNAVAILABLE_CODE: &str = "PGRST200";

/// Shape in which joined reads embed the owner's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedShape {
    /// `"profile": {...}` or `null`
    #[default]
    Object,

    /// `"profile": [{...}]` or `[]`
    List,
}

#[derive(Debug)]
pub struct Memory {
    joins: bool,
    embed_shape: EmbedShape,
    store: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    /// Insertion order is the natural row order.
    recipes: Vec<Recipe>,
    profiles: Vec<Profile>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            joins: true,
            embed_shape: EmbedShape::default(),
            store: Mutex::new(Store::default()),
        }
    }

    /// Makes joined reads fail the way a store without the foreign key
    /// relationship does.
    pub fn without_joins(mut self) -> Memory {
        self.joins = false;
        self
    }

    pub fn embed_shape(mut self, shape: EmbedShape) -> Memory {
        self.embed_shape = shape;
        self
    }

    /// Stores a recipe row as-is, bypassing validation. The owner does not
    /// need a profile.
    pub fn seed_recipe(&self, recipe: Recipe) {
        self.lock().recipes.push(recipe);
    }

    /// Stores a profile row as-is.
    pub fn seed_profile(&self, profile: Profile) {
        self.lock().profiles.push(profile);
    }

    pub fn recipe_count(&self) -> usize {
        self.lock().recipes.len()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn query_recipes(&self, op: QueryRecipes) -> Result<Response> {
        if op.include_profile && !self.joins {
            return Err(Error::join_unavailable(
                JOIN_UNAVAILABLE_CODE,
                "Could not find a relationship between 'recipes' and 'profiles' in the schema cache",
            ));
        }

        let store = self.lock();
        let recipes = op.query.apply(store.recipes.iter().cloned());
        check_single(op.single, recipes.len(), "recipes")?;

        let rows: Vec<RecipeRow> = recipes
            .into_iter()
            .map(|recipe| {
                let profile = if op.include_profile {
                    let owner = recipe
                        .user_id
                        .and_then(|owner| store.profiles.iter().find(|p| p.id == owner))
                        .cloned();
                    self.embed(owner)
                } else {
                    EmbeddedProfile::Missing
                };
                RecipeRow { recipe, profile }
            })
            .collect();

        Ok(Response::recipes(rows))
    }

    fn embed(&self, profile: Option<Profile>) -> EmbeddedProfile {
        match self.embed_shape {
            EmbedShape::Object => EmbeddedProfile::from(profile),
            EmbedShape::List => EmbeddedProfile::List(profile.into_iter().collect()),
        }
    }

    fn query_profiles(&self, op: QueryProfiles) -> Result<Response> {
        let store = self.lock();
        let profiles: Vec<Profile> = store
            .profiles
            .iter()
            .filter(|profile| op.filter.matches(profile))
            .cloned()
            .collect();

        check_single(op.single, profiles.len(), "profiles")?;
        Ok(Response::profiles(profiles))
    }

    fn insert_recipe(&self, op: InsertRecipe) -> Result<Response> {
        let recipe = op.recipe.into_recipe(RecipeId::generate(), Utc::now());
        self.lock().recipes.push(recipe.clone());
        Ok(Response::recipes([recipe]))
    }

    fn update_recipe(&self, op: UpdateRecipe) -> Result<Response> {
        let mut store = self.lock();
        let updated = store
            .recipes
            .iter_mut()
            .find(|recipe| recipe.id == op.id && recipe.is_owned_by(&op.owner))
            .map(|recipe| {
                op.changes.apply_to(recipe);
                recipe.clone()
            });

        Ok(Response::recipes(updated))
    }

    fn delete_recipe(&self, op: DeleteRecipe) -> Result<Response> {
        let mut store = self.lock();
        let before = store.recipes.len();
        store
            .recipes
            .retain(|recipe| !(recipe.id == op.id && recipe.is_owned_by(&op.owner)));
        Ok(Response::count((before - store.recipes.len()) as u64))
    }

    fn insert_profile(&self, op: InsertProfile) -> Result<Response> {
        let mut store = self.lock();
        let new = op.profile;

        if store.profiles.iter().any(|p| p.id == new.id) {
            return Err(unique_violation("profiles_pkey"));
        }
        if new.username.is_some() && store.profiles.iter().any(|p| p.username == new.username) {
            return Err(unique_violation("profiles_username_key"));
        }

        let now = Utc::now();
        let profile = Profile {
            id: new.id,
            username: new.username,
            full_name: new.full_name,
            created_at: now,
            updated_at: now,
        };
        store.profiles.push(profile.clone());
        Ok(Response::profiles([profile]))
    }

    fn update_profile(&self, op: UpdateProfile) -> Result<Response> {
        let mut store = self.lock();
        let changes = op.changes;

        if changes.username.is_some()
            && store
                .profiles
                .iter()
                .any(|p| p.id != op.id && p.username == changes.username)
        {
            return Err(unique_violation("profiles_username_key"));
        }

        let updated = store
            .profiles
            .iter_mut()
            .find(|profile| profile.id == op.id)
            .map(|profile| {
                profile.username = changes.username;
                profile.full_name = changes.full_name;
                profile.updated_at = Utc::now();
                profile.clone()
            });

        Ok(Response::profiles(updated))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

#[async_trait]
impl Driver for Memory {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        tracing::trace!(?op, "memory exec");

        match op {
            Operation::QueryRecipes(op) => self.query_recipes(op),
            Operation::QueryProfiles(op) => self.query_profiles(op),
            Operation::InsertRecipe(op) => self.insert_recipe(op),
            Operation::UpdateRecipe(op) => self.update_recipe(op),
            Operation::DeleteRecipe(op) => self.delete_recipe(op),
            Operation::InsertProfile(op) => self.insert_profile(op),
            Operation::UpdateProfile(op) => self.update_profile(op),
        }
    }

    async fn reset_db(&self) -> Result<()> {
        *self.lock() = Store::default();
        Ok(())
    }
}

/// Mirrors the store's single-object reads: no rows is "not found", more than
/// one is a malformed result.
fn check_single(single: bool, len: usize, table: &str) -> Result<()> {
    match (single, len) {
        (true, 0) => Err(Error::record_not_found(format!(
            "{table}: the result contains 0 rows"
        ))),
        (true, n) if n > 1 => Err(Error::invalid_result(format!(
            "{table}: expected a single row, the result contains {n} rows"
        ))),
        _ => Ok(()),
    }
}

fn unique_violation(constraint: &str) -> Error {
    Error::store(
        "23505",
        format!("duplicate key value violates unique constraint \"{constraint}\""),
    )
}
