//! Family model
//!
//! The family aggregate is the unit the server returns from
//! `GET /family/{id}` and the unit the client caches.

use serde::{Deserialize, Serialize};

use super::ids::{ExpenseId, FamilyId, MemberId};
use super::member::Member;
use super::money::Money;
use super::expense::Expense;

/// Family identity as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySummary {
    #[serde(alias = "_id")]
    pub id: FamilyId,
    pub name: String,
}

/// The full family aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    #[serde(alias = "_id")]
    pub id: FamilyId,

    pub name: String,

    /// Members in server order
    #[serde(default)]
    pub members: Vec<Member>,

    /// Sum of earning members' salaries, computed by the server
    #[serde(default)]
    pub total_income: Money,

    /// Sum of all member expenses, computed by the server
    #[serde(default)]
    pub total_expenses: Money,
}

impl Family {
    /// Look up a member by id
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Look up a member by name (case-insensitive)
    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.has_name(name))
    }

    /// Look up an expense of a given member
    pub fn expense(&self, member_id: &MemberId, expense_id: &ExpenseId) -> Option<&Expense> {
        self.member(member_id)
            .and_then(|m| m.expenses.iter().find(|e| &e.id == expense_id))
    }

    /// Whether another member already uses `name`, ignoring `exclude`
    pub fn name_taken(&self, name: &str, exclude: Option<&MemberId>) -> bool {
        self.members
            .iter()
            .filter(|m| Some(&m.id) != exclude)
            .any(|m| m.has_name(name))
    }

    /// Identity part of the aggregate
    pub fn summary(&self) -> FamilySummary {
        FamilySummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY_JSON: &str = r#"{
        "id": "f1",
        "name": "Sharma",
        "totalIncome": 80000,
        "totalExpenses": 12500.5,
        "members": [
            {"_id": "m1", "name": "Ravi", "isEarning": true, "salary": 50000,
             "totalSpent": 12000, "expenses": [
                {"_id": "e1", "description": "Rent share", "amount": 12000,
                 "category": "Housing", "date": "2024-03-01T00:00:00Z"}
             ]},
            {"_id": "m2", "name": "Meena", "isEarning": false, "salary": 0,
             "totalSpent": 500.5, "expenses": []}
        ]
    }"#;

    #[test]
    fn test_deserialize_aggregate() {
        let family: Family = serde_json::from_str(FAMILY_JSON).unwrap();
        assert_eq!(family.members.len(), 2);
        assert_eq!(family.total_income, Money::from_major(80000));
        assert_eq!(family.total_expenses, Money::from_minor(1250050));
        assert_eq!(family.members[0].expenses.len(), 1);
    }

    #[test]
    fn test_lookups() {
        let family: Family = serde_json::from_str(FAMILY_JSON).unwrap();
        let ravi = MemberId::from("m1");

        assert_eq!(family.member(&ravi).unwrap().name, "Ravi");
        assert_eq!(family.member_by_name("meena").unwrap().id.as_str(), "m2");
        assert!(family.expense(&ravi, &ExpenseId::from("e1")).is_some());
        assert!(family.expense(&ravi, &ExpenseId::from("nope")).is_none());
    }

    #[test]
    fn test_name_taken_excludes_member() {
        let family: Family = serde_json::from_str(FAMILY_JSON).unwrap();
        assert!(family.name_taken("RAVI", None));
        assert!(!family.name_taken("ravi", Some(&MemberId::from("m1"))));
        assert!(family.name_taken("meena", Some(&MemberId::from("m1"))));
    }

    #[test]
    fn test_summary_accepts_underscore_id() {
        let summary: FamilySummary =
            serde_json::from_str(r#"{"_id": "f9", "name": "Khan"}"#).unwrap();
        assert_eq!(summary.id.as_str(), "f9");
    }
}
