//! Status bar view
//!
//! Shows the logged-in family, the highlighted member's balance and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::services::metrics;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    if let Some(family) = app.sync.session().family() {
        spans.push(Span::styled(" Family: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            family.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(member) = app.highlighted_member() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(member.name.clone(), Style::default().fg(Color::White)));
        if let Some(balance) = metrics::balance(member) {
            let color = if balance.is_negative() {
                Color::Red
            } else {
                Color::Green
            };
            spans.push(Span::raw(" bal "));
            spans.push(Span::styled(
                balance.format_with_symbol(&app.settings.currency_symbol),
                Style::default().fg(color),
            ));
        }
    }

    let hints = " a:Add  x:Expense  v:View  ?:Help  q:Quit ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(left_len + hints.len())
        .max(1);

    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
