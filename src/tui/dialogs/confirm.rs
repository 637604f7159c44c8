//! Member deletion confirmation
//!
//! Shows the pending deletion and, when the member has expenses, how many
//! will be removed with them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::services::PendingDeletion;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, pending: &PendingDeletion) {
    let area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete Member ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(pending.prompt(), Style::default().fg(Color::White))),
    ];
    if let Some(warning) = pending.warning() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(warning, Style::default().fg(Color::Yellow))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Y]", Style::default().fg(Color::Red)),
        Span::raw(" Delete  "),
        Span::styled("[N/Esc]", Style::default().fg(Color::Green)),
        Span::raw(" Cancel"),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}
