//! Display formatting for terminal output
//!
//! Formats the family snapshot for the command line: summary block, member
//! and expense tables.

pub mod family;

pub use family::{
    format_balance, format_breakdown, format_date, format_expense_table, format_family_summary,
    format_member_table, member_status,
};
