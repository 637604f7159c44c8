//! Add expense dialog
//!
//! Description, amount and a category picker for the selected member.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{ExpenseCategory, Money};
use crate::services::ExpenseDraft;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Description,
    Amount,
    Category,
}

impl ExpenseField {
    pub fn next(self) -> Self {
        match self {
            Self::Description => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Description,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Description => Self::Category,
            Self::Amount => Self::Description,
            Self::Category => Self::Amount,
        }
    }
}

/// Buffer of the expense form
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub description_input: TextInput,
    pub amount_input: TextInput,
    /// Index into [`ExpenseCategory::ALL`]; nothing is picked initially
    pub category_index: Option<usize>,
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseFormState {
    pub fn new() -> Self {
        Self {
            focused_field: ExpenseField::Description,
            description_input: TextInput::new()
                .label("Description")
                .placeholder("What was it for?"),
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            category_index: None,
            error_message: None,
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Description => Some(&mut self.description_input),
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Category => None,
        }
    }

    pub fn category(&self) -> Option<ExpenseCategory> {
        self.category_index
            .and_then(|i| ExpenseCategory::ALL.get(i).copied())
    }

    pub fn next_category(&mut self) {
        let len = ExpenseCategory::ALL.len();
        self.category_index = Some(match self.category_index {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn prev_category(&mut self) {
        let len = ExpenseCategory::ALL.len();
        self.category_index = Some(match self.category_index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Parse the buffer into a draft; a blank amount is left for the
    /// synchronizer to reject
    pub fn to_draft(&self) -> Result<ExpenseDraft, String> {
        let amount = if self.amount_input.is_blank() {
            None
        } else {
            Some(
                Money::parse(self.amount_input.value())
                    .map_err(|_| "Amount must be a valid number".to_string())?,
            )
        };

        Ok(ExpenseDraft::new(
            self.description_input.value(),
            amount,
            self.category(),
        ))
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.expense_form;
    let member_name = app
        .selected_member_ref()
        .map(|m| m.name.as_str())
        .unwrap_or("?");

    let area = centered_rect_fixed(56, 18, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Add Expense for {} ", member_name))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category label
            Constraint::Length(8), // Category list
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let mut description = form.description_input.clone();
    description.focused = form.focused_field == ExpenseField::Description;
    frame.render_widget(&description, chunks[0]);

    let mut amount = form.amount_input.clone();
    amount.focused = form.focused_field == ExpenseField::Amount;
    frame.render_widget(&amount, chunks[1]);

    let category_focused = form.focused_field == ExpenseField::Category;
    let label_style = if category_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let picked = form
        .category()
        .map(|c| c.as_str())
        .unwrap_or("(none)");
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Category: ", label_style),
            Span::styled(picked, Style::default().fg(Color::White)),
            Span::styled(
                if category_focused { "  (↑/↓ to change)" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        chunks[2],
    );

    let items: Vec<ListItem> = ExpenseCategory::ALL
        .iter()
        .map(|c| ListItem::new(format!("  {}", c)))
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(form.category_index);
    frame.render_stateful_widget(list, chunks[3], &mut state);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[4],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::White)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.expense_form;

    match key.code {
        KeyCode::Esc => app.close_add_expense(),
        KeyCode::Enter => app.submit_add_expense(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            form.focused_field = form.focused_field.prev();
        }
        KeyCode::Tab => form.focused_field = form.focused_field.next(),
        KeyCode::BackTab => form.focused_field = form.focused_field.prev(),
        KeyCode::Up if form.focused_field == ExpenseField::Category => {
            form.prev_category();
            form.clear_error();
        }
        KeyCode::Down if form.focused_field == ExpenseField::Category => {
            form.next_category();
            form.clear_error();
        }
        _ => {
            if let Some(input) = form.focused_input() {
                if input.handle_key(key) {
                    form.clear_error();
                }
            }
        }
    }
}
