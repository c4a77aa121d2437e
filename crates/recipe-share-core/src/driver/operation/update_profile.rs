use super::*;

use crate::model::{ProfileChanges, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProfile {
    pub id: UserId,
    pub changes: ProfileChanges,
}

impl From<UpdateProfile> for Operation {
    fn from(value: UpdateProfile) -> Self {
        Self::UpdateProfile(value)
    }
}
