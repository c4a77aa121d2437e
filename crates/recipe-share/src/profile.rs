use crate::{
    driver::operation::{InsertProfile, QueryProfiles, UpdateProfile},
    model::{NewProfile, Profile, ProfileChanges, UserId},
    stmt::ProfileFilter,
    Db, Error, Result,
};

use serde::Deserialize;

/// The authenticated user a request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: UserId,
    pub email: Option<String>,
}

impl Caller {
    pub fn new(id: UserId) -> Self {
        Caller { id, email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Username given to a profile created on first visit: the e-mail's
    /// local part.
    pub fn default_username(&self) -> Option<String> {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .map(str::to_string)
    }
}

/// Profile fields as submitted by the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl ProfileInput {
    /// Trims both fields; empty values clear the column.
    pub fn normalize(&self) -> ProfileChanges {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        ProfileChanges {
            username: clean(&self.username),
            full_name: clean(&self.full_name),
        }
    }
}

impl Db {
    /// Reads a profile by its user id.
    pub async fn profile(&self, id: &UserId) -> Result<Profile> {
        self.exec(QueryProfiles::single(ProfileFilter::Id(*id)))
            .await?
            .into_profiles()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::record_not_found(format!("profiles id={id}")))
    }

    /// Reads the caller's profile, creating it on first visit.
    pub async fn get_or_create_profile(&self, caller: &Caller) -> Result<Profile> {
        match self.profile(&caller.id).await {
            Ok(profile) => return Ok(profile),
            Err(err) if err.is_record_not_found() => {}
            Err(err) => return Err(err),
        }

        let profile = NewProfile {
            id: caller.id,
            username: caller.default_username(),
            full_name: None,
        };

        let created = self
            .exec(InsertProfile { profile })
            .await?
            .into_profiles()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_result("insert returned no profile"))?;

        tracing::info!(id = %caller.id, "profile created");
        Ok(created)
    }

    /// Saves the caller's username and full name.
    ///
    /// A username already held by another profile is rejected.
    pub async fn update_profile(&self, caller: &UserId, input: ProfileInput) -> Result<Profile> {
        let changes = input.normalize();
        let current = self.profile(caller).await?;

        if let Some(username) = &changes.username {
            if current.username.as_ref() != Some(username) {
                self.ensure_username_free(caller, username).await?;
            }
        }

        let updated = self
            .exec(UpdateProfile {
                id: *caller,
                changes,
            })
            .await?
            .into_profiles()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::record_not_found(format!("profiles id={caller}")))?;

        tracing::info!(id = %caller, "profile updated");
        Ok(updated)
    }

    async fn ensure_username_free(&self, caller: &UserId, username: &str) -> Result<()> {
        let holders = self
            .exec(QueryProfiles::many(ProfileFilter::Username(username.to_string())))
            .await?
            .into_profiles()?;

        if holders.iter().any(|profile| profile.id != *caller) {
            return Err(Error::validation_invalid(
                "username",
                format!("`{username}` is already taken"),
            ));
        }

        Ok(())
    }
}
