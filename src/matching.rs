//! Item name matching
//!
//! Requested item names are matched against catalog names after trimming and lower-casing both
//! sides. One [`MatchRule`] applies to a whole request.

use serde::{Deserialize, Serialize};

/// How a requested item name is compared to a catalog item name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchRule {
    /// Normalised names must be equal.
    #[default]
    Exact,

    /// Either normalised name contains the other.
    Substring,
}

impl MatchRule {
    /// Whether `catalog` matches `requested` under this rule.
    pub fn matches(self, requested: &str, catalog: &str) -> bool {
        let requested = normalize(requested);
        let catalog = normalize(catalog);

        self.matches_normalized(&requested, &catalog)
    }

    /// Same as [`MatchRule::matches`], for names already passed through [`normalize`].
    pub fn matches_normalized(self, requested: &str, catalog: &str) -> bool {
        if requested.is_empty() || catalog.is_empty() {
            return false;
        }

        match self {
            MatchRule::Exact => requested == catalog,
            MatchRule::Substring => requested.contains(catalog) || catalog.contains(requested),
        }
    }
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
