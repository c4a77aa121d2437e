use super::UserId;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public-facing identity of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Same as the user's auth identity.
    pub id: UserId,

    /// Unique handle.
    pub username: Option<String>,

    pub full_name: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Name shown on the profile page: full name, then username.
    pub fn display_name(&self) -> &str {
        non_empty(&self.full_name)
            .or_else(|| non_empty(&self.username))
            .unwrap_or("이름 없음")
    }

    /// Name shown as a recipe's author: username, then full name.
    pub fn author_name(&self) -> Option<&str> {
        non_empty(&self.username).or_else(|| non_empty(&self.full_name))
    }

    /// Upper-cased first character for the avatar, `?` when there is no name.
    pub fn initial(&self) -> String {
        non_empty(&self.username)
            .or_else(|| non_empty(&self.full_name))
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A profile row to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub id: UserId,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

/// Columns written when a profile is edited. Both are always written so that
/// clearing a field stores `NULL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub full_name: Option<String>,
}
