use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! uuid_id {
    ( $( $(#[$attrs:meta])* $name:ident ),* ) => {
        $(
            $(#[$attrs])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                pub fn new(id: Uuid) -> Self {
                    Self(id)
                }

                /// Generates a fresh random identifier.
                pub fn generate() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn as_uuid(&self) -> &Uuid {
                    &self.0
                }
            }

            impl From<Uuid> for $name {
                fn from(id: Uuid) -> Self {
                    Self(id)
                }
            }

            impl FromStr for $name {
                type Err = crate::Error;

                fn from_str(s: &str) -> crate::Result<Self> {
                    Ok(Self(Uuid::parse_str(s)?))
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }
        )*
    };
}

uuid_id! {
    /// Identity of a recipe row.
    RecipeId,

    /// Identity of an authenticated user; also the identity of their profile.
    UserId
}
