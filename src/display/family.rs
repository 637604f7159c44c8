//! Family display formatting
//!
//! Formats the family snapshot for terminal output: the dashboard summary,
//! the member table and per-member expense history.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::DEFAULT_DATE_FORMAT;
use crate::models::{Family, Member, Money};
use crate::services::metrics::{self, FamilyOverview, MemberMetrics};

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Budget (50%)")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Expenses")]
    expenses: usize,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// "Earning" or "Non-earning"
pub fn member_status(member: &Member) -> &'static str {
    if member.is_earning {
        "Earning"
    } else {
        "Non-earning"
    }
}

/// Balance text, `N/A` for members without a salary concept
pub fn format_balance(balance: Option<Money>, symbol: &str) -> String {
    balance
        .map(|b| b.format_with_symbol(symbol))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Dashboard header block
pub fn format_family_summary(family: &Family, symbol: &str) -> String {
    let overview = FamilyOverview::from_family(family);
    let mut output = String::new();

    output.push_str(&format!("Family: {}\n", family.name));
    output.push_str(&format!(
        "Members:        {} ({} earning)\n",
        overview.member_count, overview.earning_count
    ));
    output.push_str(&format!(
        "Total income:   {}\n",
        overview.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total expenses: {}\n",
        overview.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net:            {}\n",
        overview.net.format_with_symbol(symbol)
    ));

    output
}

/// Member table with derived figures
pub fn format_member_table(family: &Family, symbol: &str) -> String {
    if family.members.is_empty() {
        return "No members yet.".to_string();
    }

    let rows: Vec<MemberRow> = family
        .members
        .iter()
        .map(|member| {
            let figures = MemberMetrics::for_member(member);
            MemberRow {
                name: member.name.clone(),
                status: member_status(member),
                salary: if member.is_earning {
                    member.salary.format_with_symbol(symbol)
                } else {
                    "-".to_string()
                },
                budget: figures.budget_allocation.format_with_symbol(symbol),
                spent: member.total_spent.format_with_symbol(symbol),
                balance: format_balance(figures.balance, symbol),
                savings: figures.savings.describe(symbol),
                expenses: figures.expense_count,
            }
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

/// Render `date` with a strftime `format`, falling back to the default
/// format when chrono rejects it
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Expense history for one member, newest first, followed by the category
/// breakdown
pub fn format_expense_table(member: &Member, symbol: &str, date_format: &str) -> String {
    if member.expenses.is_empty() {
        return format!("No expenses recorded for {}.", member.name);
    }

    let mut expenses: Vec<_> = member.expenses.iter().collect();
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let rows: Vec<ExpenseRow> = expenses
        .into_iter()
        .map(|expense| ExpenseRow {
            id: expense.id.to_string(),
            date: format_date(&expense.date, date_format),
            description: expense.description.clone(),
            category: expense.category.to_string(),
            amount: expense.amount.format_with_symbol(symbol),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push_str("\n\n");
    output.push_str(&format_breakdown(member, symbol));
    output
}

/// Per-category totals
pub fn format_breakdown(member: &Member, symbol: &str) -> String {
    let breakdown = metrics::expense_breakdown(member);
    if breakdown.is_empty() {
        return String::new();
    }

    let width = breakdown
        .iter()
        .map(|(category, _)| category.as_str().len())
        .max()
        .unwrap_or(8);

    let mut output = String::from("By category:\n");
    for (category, total) in breakdown {
        output.push_str(&format!(
            "  {:<width$}  {:>14}\n",
            category.as_str(),
            total.format_with_symbol(symbol),
            width = width
        ));
    }
    output.push_str(&format!(
        "  {:<width$}  {:>14}\n",
        "Total",
        member.total_spent.format_with_symbol(symbol),
        width = width
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::sample_family;

    #[test]
    fn test_summary_shows_server_totals() {
        let family = sample_family();
        let summary = format_family_summary(&family, "₹");
        assert!(summary.contains("Family: Sharma"));
        assert!(summary.contains("2 (1 earning)"));
        assert!(summary.contains("₹50000.00"));
        assert!(summary.contains("₹12950.00"));
        assert!(summary.contains("₹37050.00"));
    }

    #[test]
    fn test_member_table_metrics() {
        let family = sample_family();
        let table = format_member_table(&family, "₹");
        assert!(table.contains("Ravi"));
        assert!(table.contains("₹38000.00 (76.0%)"));
        assert!(table.contains("₹25000.00"));
        assert!(table.contains("N/A"));
        assert!(table.contains("Non-earning"));
    }

    #[test]
    fn test_empty_family() {
        let mut family = sample_family();
        family.members.clear();
        assert_eq!(format_member_table(&family, "₹"), "No members yet.");
    }

    #[test]
    fn test_expense_table_with_breakdown() {
        let family = sample_family();
        let meena = &family.members[1];
        let table = format_expense_table(meena, "₹", "%Y-%m-%d");
        assert!(table.contains("Vegetables"));
        assert!(table.contains("2024-03-01"));
        assert!(table.contains("By category:"));
        assert!(table.contains("Transportation"));
        assert!(table.contains("₹950.00"));
    }

    #[test]
    fn test_bad_date_format_uses_default() {
        let family = sample_family();
        let meena = &family.members[1];
        let table = format_expense_table(meena, "₹", "%Q");
        assert!(table.contains("2024-03-01"));
        assert!(table.contains("Vegetables"));

        let date = meena.expenses[0].date;
        assert_eq!(format_date(&date, "%d/%m/%Y"), "01/03/2024");
    }

    #[test]
    fn test_balance_format() {
        assert_eq!(format_balance(None, "₹"), "N/A");
        assert_eq!(format_balance(Some(Money::from_major(-5)), "₹"), "-₹5.00");
    }
}
