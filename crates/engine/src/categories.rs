//! The fixed set of transaction categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Category a transaction is filed under.
///
/// The set is closed: it is serialized by its display label (e.g.
/// `"Food & Dining"`) and anything else is rejected on load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Transportation,
    Shopping,
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    Healthcare,
    Education,
    Travel,
    Income,
    Other,
}

impl Category {
    /// Every category, in the order forms should offer them.
    pub const ALL: [Category; 10] = [
        Self::FoodAndDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsAndUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::Income,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Matches a label ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::UnknownCategory(wanted.to_string()))
    }
}
