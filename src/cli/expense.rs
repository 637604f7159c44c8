//! Expense CLI commands

use clap::Subcommand;

use super::{explain, find_member, load_family, report};
use crate::config::Settings;
use crate::display::format_expense_table;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{ExpenseCategory, ExpenseId, Money};
use crate::services::{ExpenseDraft, Operation, Synchronizer};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Show a member's expense history
    List {
        /// Member name or ID
        member: String,
    },

    /// Record an expense for a member
    Add {
        /// Member name or ID
        member: String,
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "450" or "450.50")
        amount: String,
        /// Category (Food, Transportation, Housing, Utilities, Healthcare,
        /// Entertainment, Shopping, Others)
        #[arg(short, long)]
        category: String,
    },

    /// Delete an expense
    Delete {
        /// Member name or ID
        member: String,
        /// Expense ID (shown by `expense list`)
        expense: String,
    },
}

fn parse_category(raw: &str) -> HouseholdResult<ExpenseCategory> {
    ExpenseCategory::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect();
        HouseholdError::Validation(format!(
            "Unknown category '{}'. Expected one of: {}",
            raw,
            known.join(", ")
        ))
    })
}

/// Handle an expense command
pub fn handle_expense_command(
    sync: &mut Synchronizer,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> HouseholdResult<()> {
    let family = load_family(sync)?;

    match cmd {
        ExpenseCommands::List { member } => {
            let member = find_member(&family, &member)?;
            print!(
                "{}",
                format_expense_table(member, &settings.currency_symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Add {
            member,
            description,
            amount,
            category,
        } => {
            let member_id = find_member(&family, &member)?.id.clone();
            let amount = Money::parse(&amount)
                .map_err(|e| HouseholdError::Validation(format!("Invalid amount: {}", e)))?;
            let draft = ExpenseDraft::new(description, Some(amount), Some(parse_category(&category)?));

            let outcome = sync
                .add_expense(&member_id, draft)
                .map_err(|e| explain(Operation::AddExpense, e))?;
            report(Operation::AddExpense, &outcome);
        }

        ExpenseCommands::Delete { member, expense } => {
            let member_id = find_member(&family, &member)?.id.clone();

            let outcome = sync
                .delete_expense(&member_id, &ExpenseId::from(expense.as_str()))
                .map_err(|e| explain(Operation::DeleteExpense, e))?;
            report(Operation::DeleteExpense, &outcome);
        }
    }

    Ok(())
}
