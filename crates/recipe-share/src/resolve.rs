//! Reads recipes together with their owners' profiles.
//!
//! Every read first asks the store for a joined result. Stores that cannot
//! resolve the `recipes.user_id -> profiles.id` relationship report
//! [`Error::is_join_unavailable`]; the resolver then reads the recipes on
//! their own and fetches the owners' profiles in one follow-up read.
//!
//! Profile enrichment is best effort. A failed or empty profile read leaves
//! `profile: None` on the affected recipes and never fails the call. Failing
//! to read the recipes themselves always does.
//!
//! Nothing is remembered between calls: each call tries the joined read
//! again, and a call costs at most three store round trips.

use crate::{
    driver::{
        operation::{QueryProfiles, QueryRecipes},
        Operation, Response,
    },
    model::{Profile, Recipe, RecipeId, RecipeRow, RecipeWithProfile, UserId},
    stmt::{ProfileFilter, RecipeQuery},
    Driver, Error, Result,
};

use indexmap::IndexSet;
use recipe_share_core::err;
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct ProfileJoinResolver<'a> {
    driver: &'a dyn Driver,
}

impl<'a> ProfileJoinResolver<'a> {
    pub fn new(driver: &'a dyn Driver) -> Self {
        ProfileJoinResolver { driver }
    }

    /// Reads every recipe matching `query`, each with its owner's profile.
    ///
    /// Rows come back in the store's order for the query's ordering clause.
    pub async fn fetch_many(&self, query: RecipeQuery) -> Result<Vec<RecipeWithProfile>> {
        let joined = self.exec(QueryRecipes::joined(query.clone())).await;

        let err = match joined.and_then(|response| response.into_recipes()) {
            Ok(rows) => return Ok(rows.into_iter().map(embed).collect()),
            Err(err) if err.is_join_unavailable() => err,
            Err(err) => return Err(err),
        };

        info!(
            code = err.code().unwrap_or_default(),
            "joined recipe read unavailable; reading recipes and profiles separately"
        );

        let recipes: Vec<Recipe> = self
            .exec(QueryRecipes::plain(query))
            .await
            .and_then(Response::into_recipes)
            .map_err(|err| {
                err.context("joined read unavailable; reading recipes on their own")
            })?
            .into_iter()
            .map(|row| row.recipe)
            .collect();

        let owners = distinct_owners(&recipes);

        if owners.is_empty() {
            return Ok(without_profiles(recipes));
        }

        let profiles = match self.profiles(ProfileFilter::IdIn(owners)).await {
            Ok(profiles) => profiles,
            Err(err) => {
                warn!(error = %err, "profile read failed; returning recipes without profiles");
                return Ok(without_profiles(recipes));
            }
        };

        Ok(merge(recipes, profiles))
    }

    /// Reads one recipe with its owner's profile.
    ///
    /// Returns an error satisfying [`Error::is_record_not_found`] when no
    /// recipe has this id, whichever path the read took.
    pub async fn fetch_one(&self, id: RecipeId) -> Result<RecipeWithProfile> {
        let joined = self
            .exec(QueryRecipes::joined(RecipeQuery::by_id(id)).single())
            .await;

        let err = match joined.and_then(|response| response.into_recipes()) {
            Ok(rows) => {
                return rows
                    .into_iter()
                    .next()
                    .map(embed)
                    .ok_or_else(|| not_found(id));
            }
            Err(err) if err.is_join_unavailable() => err,
            Err(err) => return Err(err),
        };

        info!(
            code = err.code().unwrap_or_default(),
            %id,
            "joined recipe read unavailable; reading recipe and profile separately"
        );

        let recipe = self
            .exec(QueryRecipes::plain(RecipeQuery::by_id(id)).single())
            .await
            .and_then(Response::into_recipes)
            .map_err(|err| {
                err.context(err!("joined read unavailable; reading recipe {id} on its own"))
            })?
            .into_iter()
            .next()
            .map(|row| row.recipe)
            .ok_or_else(|| not_found(id))?;

        let profile = match recipe.user_id {
            Some(owner) => self.owner_profile(owner).await,
            None => None,
        };

        Ok(RecipeWithProfile::new(recipe, profile))
    }

    /// Single-profile read for the fallback path. Any failure yields `None`.
    async fn owner_profile(&self, owner: UserId) -> Option<Profile> {
        match self.profiles(ProfileFilter::Id(owner)).await {
            Ok(profiles) => profiles.into_iter().next(),
            Err(err) if err.is_record_not_found() => {
                debug!(%owner, "recipe owner has no profile");
                None
            }
            Err(err) => {
                warn!(%owner, error = %err, "profile read failed; returning recipe without profile");
                None
            }
        }
    }

    async fn profiles(&self, filter: ProfileFilter) -> Result<Vec<Profile>> {
        let single = matches!(filter, ProfileFilter::Id(_));
        let op = if single {
            QueryProfiles::single(filter)
        } else {
            QueryProfiles::many(filter)
        };

        self.exec(op).await?.into_profiles()
    }

    async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let op = op.into();
        debug!(driver = self.driver.name(), ?op, "resolver attempt");
        self.driver.exec(op).await
    }
}

/// Converts a row as the store returned it, collapsing the embedded profile's
/// shape.
fn embed(row: RecipeRow) -> RecipeWithProfile {
    RecipeWithProfile::new(row.recipe, row.profile.into_profile())
}

/// Owner ids of `recipes`, without duplicates or `NULL`s, in first-seen order.
fn distinct_owners(recipes: &[Recipe]) -> Vec<UserId> {
    recipes
        .iter()
        .filter_map(|recipe| recipe.user_id)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn without_profiles(recipes: Vec<Recipe>) -> Vec<RecipeWithProfile> {
    recipes
        .into_iter()
        .map(|recipe| RecipeWithProfile::new(recipe, None))
        .collect()
}

fn merge(recipes: Vec<Recipe>, profiles: Vec<Profile>) -> Vec<RecipeWithProfile> {
    let by_id: HashMap<UserId, Profile> = profiles
        .into_iter()
        .map(|profile| (profile.id, profile))
        .collect();

    recipes
        .into_iter()
        .map(|recipe| {
            let profile = recipe.user_id.and_then(|owner| by_id.get(&owner).cloned());
            RecipeWithProfile::new(recipe, profile)
        })
        .collect()
}

fn not_found(id: RecipeId) -> Error {
    Error::record_not_found(format!("recipes id={id}"))
}
