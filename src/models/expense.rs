//! Expense model
//!
//! A dated, categorized spending record attached to a member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// The fixed set of expense categories accepted by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Housing,
    Utilities,
    Healthcare,
    Entertainment,
    Shopping,
    Others,
}

impl ExpenseCategory {
    /// Every category, in display order
    pub const ALL: [ExpenseCategory; 8] = [
        Self::Food,
        Self::Transportation,
        Self::Housing,
        Self::Utilities,
        Self::Healthcare,
        Self::Entertainment,
        Self::Shopping,
        Self::Others,
    ];

    /// Parse a category name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// The wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded expense as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Server-issued identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Positive amount
    pub amount: Money,

    /// Spending category
    pub category: ExpenseCategory,

    /// When the expense was recorded
    #[serde(alias = "createdAt")]
    pub date: DateTime<Utc>,
}
