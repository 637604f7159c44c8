//! Core data models for the household client
//!
//! These mirror the entities served by the family expense API: the family
//! aggregate, its members and their expenses.

pub mod expense;
pub mod family;
pub mod ids;
pub mod member;
pub mod money;

pub use expense::{Expense, ExpenseCategory};
pub use family::{Family, FamilySummary};
pub use ids::{ExpenseId, FamilyId, MemberId};
pub use member::Member;
pub use money::{Money, MoneyParseError};
