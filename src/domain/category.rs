//! The closed set of expense categories and their presentation labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported expense categories. Stored as lowercase string codes so the
/// ledger file stays readable and tolerates codes this build does not know.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Food,
    Snacks,
    Home,
    Other,
}

impl Category {
    /// All categories, in the order the entry keyboard offers them.
    pub const ALL: [Category; 5] = [
        Category::Entertainment,
        Category::Food,
        Category::Snacks,
        Category::Home,
        Category::Other,
    ];

    /// Returns the storage code for this category.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Entertainment => "entertainment",
            Category::Food => "food",
            Category::Snacks => "snacks",
            Category::Home => "home",
            Category::Other => "other",
        }
    }

    /// Parses a storage code. Returns `None` for codes outside the closed set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "entertainment" => Some(Category::Entertainment),
            "food" => Some(Category::Food),
            "snacks" => Some(Category::Snacks),
            "home" => Some(Category::Home),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(category_label(self.code()))
    }
}

/// Maps a stored category code to its human label. Unknown codes come back
/// unchanged so rows written by a newer build still render.
pub fn category_label(code: &str) -> &str {
    match code {
        "entertainment" => "Entertainment",
        "food" => "Food",
        "snacks" => "Snacks",
        "home" => "Home",
        "other" => "Other",
        raw => raw,
    }
}
