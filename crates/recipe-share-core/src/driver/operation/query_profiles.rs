use super::*;

use crate::stmt::ProfileFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryProfiles {
    pub filter: ProfileFilter,

    /// Expect exactly one row. No rows is reported as not found.
    pub single: bool,
}

impl QueryProfiles {
    pub fn many(filter: ProfileFilter) -> Self {
        QueryProfiles {
            filter,
            single: false,
        }
    }

    pub fn single(filter: ProfileFilter) -> Self {
        QueryProfiles {
            filter,
            single: true,
        }
    }
}

impl From<QueryProfiles> for Operation {
    fn from(value: QueryProfiles) -> Self {
        Self::QueryProfiles(value)
    }
}
