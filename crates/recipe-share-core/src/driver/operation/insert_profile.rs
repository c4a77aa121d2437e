use super::*;

use crate::model::NewProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertProfile {
    pub profile: NewProfile,
}

impl From<InsertProfile> for Operation {
    fn from(value: InsertProfile) -> Self {
        Self::InsertProfile(value)
    }
}
