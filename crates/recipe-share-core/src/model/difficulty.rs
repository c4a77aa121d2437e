use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How hard a recipe is. Stored with the Korean labels the `recipes`
/// table's check constraint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "쉬움")]
    Easy,
    #[serde(rename = "보통")]
    Normal,
    #[serde(rename = "어려움")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "쉬움",
            Difficulty::Normal => "보통",
            Difficulty::Hard => "어려움",
        }
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    /// Accepts the stored label or the English variant name.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim() {
            "쉬움" | "easy" => Ok(Difficulty::Easy),
            "보통" | "normal" => Ok(Difficulty::Normal),
            "어려움" | "hard" => Ok(Difficulty::Hard),
            other => Err(crate::Error::validation_invalid(
                "difficulty",
                format!("`{other}` is not one of 쉬움, 보통, 어려움"),
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
