use crate::model::{Profile, UserId};

/// Which profiles a profile read selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileFilter {
    Id(UserId),

    /// `id IN (...)`; ids are distinct and in first-seen order.
    IdIn(Vec<UserId>),

    Username(String),
}

impl ProfileFilter {
    pub fn matches(&self, profile: &Profile) -> bool {
        match self {
            ProfileFilter::Id(id) => profile.id == *id,
            ProfileFilter::IdIn(ids) => ids.contains(&profile.id),
            ProfileFilter::Username(username) => {
                profile.username.as_deref() == Some(username.as_str())
            }
        }
    }
}
