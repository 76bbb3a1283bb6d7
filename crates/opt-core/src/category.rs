//! Exposure classification.
//!
//! An exposure's free-text type maps to zero, one, or both of two fixed
//! categories. Matching is case-insensitive after trimming; unknown types
//! belong to no category.

use serde::{Deserialize, Serialize};

/// Exposure types that build the network capital.
pub const NETWORK_TYPES: [&str; 5] = ["outreach", "interview", "proposal", "post", "portfolio_update"];

/// Exposure types that build the leads capital.
pub const LEAD_TYPES: [&str; 4] = ["application", "outreach", "proposal", "post"];

/// Signal category an exposure can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Network,
    Lead,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Network, Category::Lead];

    fn bit(self) -> u8 {
        match self {
            Self::Network => 0b01,
            Self::Lead => 0b10,
        }
    }

    /// Exposure types belonging to this category.
    pub fn members(self) -> &'static [&'static str] {
        match self {
            Self::Network => &NETWORK_TYPES,
            Self::Lead => &LEAD_TYPES,
        }
    }
}

/// Set of categories an exposure type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

/// Classify an exposure type into its categories.
///
/// # Examples
///
/// ```
/// use opt_core::category::{classify, Category};
///
/// let tags = classify("  Outreach ");
/// assert!(tags.contains(Category::Network));
/// assert!(tags.contains(Category::Lead));
/// assert!(classify("lunch").is_empty());
/// ```
pub fn classify(exposure_type: &str) -> CategorySet {
    let normalized = exposure_type.trim().to_lowercase();
    let mut set = CategorySet::EMPTY;
    for category in Category::ALL {
        if category.members().contains(&normalized.as_str()) {
            set.insert(category);
        }
    }
    set
}
