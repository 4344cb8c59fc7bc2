//! Search and category filtering over loaded locations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::records::{Category, LocationRecord};

/// The category selector shown above the location list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Station,
    Center,
}

impl CategoryFilter {
    /// `All` accepts every record, including unknown categories; the other
    /// variants require an exact match.
    #[must_use]
    pub fn matches(self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Station => *category == Category::Station,
            CategoryFilter::Center => *category == Category::Center,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(CategoryFilter::All),
            "station" | "delegacia" => Ok(CategoryFilter::Station),
            "center" | "centro" => Ok(CategoryFilter::Center),
            other => Err(format!(
                "unknown filter '{other}' (expected all, station or center)"
            )),
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Station => write!(f, "station"),
            CategoryFilter::Center => write!(f, "center"),
        }
    }
}

/// Returns true when `needle` (already lowercased) occurs in the record's
/// name, address or city.
fn matches_query(record: &LocationRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(needle)
        || record.address.to_lowercase().contains(needle)
        || record
            .city
            .as_deref()
            .is_some_and(|city| city.to_lowercase().contains(needle))
}

/// Selects the records matching both the free-text `query` and `category`.
///
/// Matching is a case-insensitive substring test; input order is preserved.
#[must_use]
pub fn filter(
    records: &[LocationRecord],
    query: &str,
    category: CategoryFilter,
) -> Vec<LocationRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| category.matches(&record.category) && matches_query(record, &needle))
        .cloned()
        .collect()
}
