use super::Profile;

use serde::{Deserialize, Serialize};

/// The profile a joined read embeds in each recipe row.
///
/// Depending on how the store infers the relationship's cardinality it sends
/// either a single object or a one-element array, or `null` when nothing
/// matched. This type accepts all of them; callers convert it with
/// [`EmbeddedProfile::into_profile`] straight away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddedProfile {
    /// The row carried no profile, or the read did not ask for one.
    #[default]
    Missing,

    One(Profile),

    List(Vec<Profile>),
}

impl EmbeddedProfile {
    /// Normalizes to at most one profile. A list keeps its first element.
    pub fn into_profile(self) -> Option<Profile> {
        match self {
            EmbeddedProfile::Missing => None,
            EmbeddedProfile::One(profile) => Some(profile),
            EmbeddedProfile::List(profiles) => profiles.into_iter().next(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EmbeddedProfile::Missing)
    }
}

impl From<Option<Profile>> for EmbeddedProfile {
    fn from(profile: Option<Profile>) -> Self {
        profile.map_or(EmbeddedProfile::Missing, EmbeddedProfile::One)
    }
}
