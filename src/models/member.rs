//! Member model
//!
//! A person within a family, optionally earning a salary, owning a list of
//! expenses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::MemberId;
use super::money::Money;

/// A family member as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Server-issued identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: MemberId,

    /// Display name, unique within the family (case-insensitive)
    pub name: String,

    /// Whether this member contributes a salary
    #[serde(default)]
    pub is_earning: bool,

    /// Monthly salary; meaningful only when earning
    #[serde(default)]
    pub salary: Money,

    /// Sum of this member's expenses, computed by the server
    #[serde(default)]
    pub total_spent: Money,

    /// Expenses in server order
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Member {
    /// Case-insensitive name comparison used for duplicate checks
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Number of recorded expenses
    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_name_is_case_insensitive() {
        let member = Member {
            id: MemberId::from("m1"),
            name: "Asha".into(),
            is_earning: false,
            salary: Money::zero(),
            total_spent: Money::zero(),
            expenses: Vec::new(),
        };
        assert!(member.has_name("asha"));
        assert!(member.has_name(" ASHA "));
        assert!(!member.has_name("Ashok"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "_id": "m1",
            "name": "Ravi",
            "isEarning": true,
            "salary": 50000,
            "totalSpent": 12000,
            "expenses": []
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.is_earning);
        assert_eq!(member.salary, Money::from_major(50000));
        assert_eq!(member.total_spent, Money::from_major(12000));
    }
}
