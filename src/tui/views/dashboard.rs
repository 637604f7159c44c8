//! Dashboard view
//!
//! Family header, one row per member with its derived figures, and the
//! inline history of the expanded member.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::family::{format_balance, format_date, member_status};
use crate::models::{Family, Member};
use crate::services::metrics::{FamilyOverview, MemberMetrics, SavingsStatus};
use crate::tui::app::App;

pub fn render_header(frame: &mut Frame, app: &App, family: &Family, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let overview = FamilyOverview::from_family(family);

    let net_color = if overview.net.is_negative() {
        Color::Red
    } else {
        Color::Green
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Members: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{} ({} earning)", overview.member_count, overview.earning_count),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Income: ", Style::default().fg(Color::White)),
            Span::styled(
                overview.total_income.format_with_symbol(symbol),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled("Expenses: ", Style::default().fg(Color::White)),
            Span::styled(
                overview.total_expenses.format_with_symbol(symbol),
                Style::default().fg(Color::Red),
            ),
            Span::raw("   "),
            Span::styled("Net: ", Style::default().fg(Color::White)),
            Span::styled(
                overview.net.format_with_symbol(symbol),
                Style::default().fg(net_color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} Family ", family.name))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn savings_cell(status: &SavingsStatus, symbol: &str) -> Cell<'static> {
    let color = match status {
        SavingsStatus::OnTarget { .. } => Color::Green,
        SavingsStatus::BelowTarget => Color::Yellow,
        SavingsStatus::NotApplicable => Color::DarkGray,
    };
    Cell::from(status.describe(symbol)).style(Style::default().fg(color))
}

pub fn render_members(frame: &mut Frame, app: &App, family: &Family, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let block = Block::default()
        .title(" Members ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    if family.members.is_empty() {
        frame.render_widget(
            Paragraph::new("No members yet. Press 'a' to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = family
        .members
        .iter()
        .map(|member| {
            let figures = MemberMetrics::for_member(member);
            let marker = if app.expanded_member.as_ref() == Some(&member.id) {
                "▾ "
            } else {
                "▸ "
            };
            let balance_color = match figures.balance {
                Some(b) if b.is_negative() => Color::Red,
                Some(_) => Color::White,
                None => Color::DarkGray,
            };

            Row::new(vec![
                Cell::from(format!("{}{}", marker, member.name)),
                Cell::from(member_status(member)),
                Cell::from(if member.is_earning {
                    member.salary.format_with_symbol(symbol)
                } else {
                    "-".to_string()
                }),
                Cell::from(figures.budget_allocation.format_with_symbol(symbol)),
                Cell::from(member.total_spent.format_with_symbol(symbol)),
                Cell::from(format_balance(figures.balance, symbol))
                    .style(Style::default().fg(balance_color)),
                savings_cell(&figures.savings, symbol),
                Cell::from(figures.expense_count.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Min(24),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec![
            "Name", "Status", "Salary", "Budget 50%", "Spent", "Balance", "Savings", "Expenses",
        ])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .block(block);

    let mut state = TableState::default();
    state.select(Some(app.member_cursor.min(family.members.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_history(frame: &mut Frame, app: &App, member: &Member, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let block = Block::default()
        .title(format!(" Expense history: {} ", member.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if member.expenses.is_empty() {
        frame.render_widget(
            Paragraph::new("No expenses recorded yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = member
        .expenses
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(format_date(&expense.date, &app.settings.date_format)),
                Cell::from(expense.description.clone()),
                Cell::from(expense.category.as_str()),
                Cell::from(expense.amount.format_with_symbol(symbol)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(15),
            Constraint::Length(14),
        ],
    )
    .header(
        Row::new(vec!["Date", "Description", "Category", "Amount"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(block);

    frame.render_widget(table, area);
}

/// Shown while the first fetch has not produced a family
pub fn render_unloaded(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new("Family details not loaded. Press 'r' to retry, 'L' to log out.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
