//! Expense history dialog
//!
//! Lists the selected member's expenses with a per-category breakdown.
//! Expenses are deleted from here without a confirmation step.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::format_date;
use crate::models::{ExpenseCategory, Money};
use crate::services::metrics;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let Some(member) = app.selected_member_ref() else {
        return;
    };
    let symbol = app.settings.currency_symbol.as_str();

    let block = Block::default()
        .title(format!(" Expenses: {} ", member.name))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let breakdown = metrics::expense_breakdown(member);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(breakdown.len() as u16 + 2),
            Constraint::Length(1),
        ])
        .split(inner);

    if member.expenses.is_empty() {
        frame.render_widget(
            Paragraph::new("No expenses recorded yet.").style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );
    } else {
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
                Constraint::Min(16),
                Constraint::Length(15),
                Constraint::Length(14),
            ],
        )
        .header(
            Row::new(vec!["Date", "Description", "Category", "Amount"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(app.expense_cursor.min(member.expenses.len() - 1)));
        frame.render_stateful_widget(table, chunks[0], &mut state);
    }

    render_breakdown(frame, chunks[1], &breakdown, symbol, member.total_spent);

    let hints = Line::from(vec![
        Span::styled("[j/k]", Style::default().fg(Color::White)),
        Span::raw(" Move  "),
        Span::styled("[d]", Style::default().fg(Color::Red)),
        Span::raw(" Delete  "),
        Span::styled("[x]", Style::default().fg(Color::Green)),
        Span::raw(" Add  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Close"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}

fn render_breakdown(
    frame: &mut Frame,
    area: Rect,
    breakdown: &[(ExpenseCategory, Money)],
    symbol: &str,
    total: Money,
) {
    let mut lines = vec![Line::from(Span::styled(
        "By category",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];
    for (category, amount) in breakdown {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<15}", category.as_str()), Style::default().fg(Color::White)),
            Span::styled(amount.format_with_symbol(symbol), Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<15}", "Total"), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            total.format_with_symbol(symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    let count = app.selected_member_ref().map_or(0, |m| m.expenses.len());

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_view_expenses(),
        KeyCode::Char('j') | KeyCode::Down => {
            if app.expense_cursor + 1 < count {
                app.expense_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.expense_cursor = app.expense_cursor.saturating_sub(1);
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_highlighted_expense(),
        KeyCode::Char('x') => app.open_add_expense_for_selected(),
        _ => {}
    }
}
