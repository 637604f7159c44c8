//! Dialog modules for the TUI

pub mod confirm;
pub mod expense;
pub mod help;
pub mod member;
pub mod view_expenses;
