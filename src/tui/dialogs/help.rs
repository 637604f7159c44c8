//! Help dialog
//!
//! Keyboard shortcuts for the dashboard and its dialogs

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(
        Paragraph::new(help_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        section("Dashboard"),
        Line::from(""),
        key_line("j/k", "Move between members"),
        key_line("Enter", "Show/hide expense history"),
        key_line("a", "Add member"),
        key_line("e", "Edit member"),
        key_line("d", "Delete member"),
        key_line("x", "Add expense for member"),
        key_line("v", "View and delete expenses"),
        key_line("r", "Refresh family details"),
        key_line("L", "Log out"),
        key_line("q", "Quit"),
        Line::from(""),
        section("Dialogs"),
        Line::from(""),
        key_line("Tab", "Next field"),
        key_line("Space", "Toggle earning member"),
        key_line("↑/↓", "Pick expense category"),
        key_line("Enter", "Save"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
