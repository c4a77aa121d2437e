use std::{fmt, str::FromStr};

/// The categories a recipe can be filed under when it is written.
///
/// The `category` column itself is free text, so rows read back from the
/// store keep the raw string; this type is used to validate input and to
/// pick a card icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Korean,
    Western,
    Chinese,
    Japanese,
    Dessert,
    Drink,
    Snack,
    Healthy,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Korean,
        Category::Western,
        Category::Chinese,
        Category::Japanese,
        Category::Dessert,
        Category::Drink,
        Category::Snack,
        Category::Healthy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Korean => "한식",
            Category::Western => "양식",
            Category::Chinese => "중식",
            Category::Japanese => "일식",
            Category::Dessert => "디저트",
            Category::Drink => "음료",
            Category::Snack => "간식",
            Category::Healthy => "건강식",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Korean => "🍚",
            Category::Western => "🍝",
            Category::Chinese => "🥢",
            Category::Japanese => "🍣",
            Category::Dessert => "🍰",
            Category::Drink => "🥤",
            Category::Snack => "🍪",
            Category::Healthy => "🥗",
        }
    }

    /// Icon for a stored category string; unknown or missing categories get
    /// the generic pan.
    pub fn icon_for(category: Option<&str>) -> &'static str {
        category
            .and_then(|c| c.parse::<Category>().ok())
            .map(|c| c.icon())
            .unwrap_or("🍳")
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                crate::Error::validation_invalid("category", format!("`{s}` is not a known category"))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
