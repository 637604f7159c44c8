//! Member dialog
//!
//! Modal form shared by "Add Member" and "Edit Member": name, earning toggle
//! and salary, with tab navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Member, MemberId, Money};
use crate::services::MemberDraft;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberField {
    #[default]
    Name,
    Earning,
    Salary,
}

/// Which of the two member dialogs a key or render call is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDialog {
    Add,
    Edit,
}

/// Buffer of the member form
#[derive(Debug, Clone)]
pub struct MemberFormState {
    pub focused_field: MemberField,
    pub name_input: TextInput,
    pub is_earning: bool,
    pub salary_input: TextInput,
    /// Member being edited; `None` for a new member
    pub editing: Option<MemberId>,
    pub error_message: Option<String>,
}

impl Default for MemberFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberFormState {
    pub fn new() -> Self {
        Self {
            focused_field: MemberField::Name,
            name_input: TextInput::new().label("Name").placeholder("Member name"),
            is_earning: false,
            salary_input: TextInput::new().label("Salary").placeholder("0.00"),
            editing: None,
            error_message: None,
        }
    }

    /// Form pre-populated from an existing member
    pub fn from_member(member: &Member) -> Self {
        let mut form = Self::new();
        form.name_input.set(member.name.clone());
        form.is_earning = member.is_earning;
        if member.is_earning {
            form.salary_input.set(member.salary.to_string());
        }
        form.editing = Some(member.id.clone());
        form
    }

    /// Salary is skipped while the member is not earning
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            MemberField::Name => MemberField::Earning,
            MemberField::Earning if self.is_earning => MemberField::Salary,
            MemberField::Earning | MemberField::Salary => MemberField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            MemberField::Name if self.is_earning => MemberField::Salary,
            MemberField::Name => MemberField::Earning,
            MemberField::Earning => MemberField::Name,
            MemberField::Salary => MemberField::Earning,
        };
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            MemberField::Name => Some(&mut self.name_input),
            MemberField::Salary => Some(&mut self.salary_input),
            MemberField::Earning => None,
        }
    }

    pub fn toggle_earning(&mut self) {
        self.is_earning = !self.is_earning;
    }

    /// Parse the buffer into a draft. Only the salary text can fail here;
    /// everything else is checked by the synchronizer.
    pub fn to_draft(&self) -> Result<MemberDraft, String> {
        let salary = if self.is_earning && !self.salary_input.is_blank() {
            Some(
                Money::parse(self.salary_input.value())
                    .map_err(|_| "Salary must be a valid amount".to_string())?,
            )
        } else {
            None
        };

        Ok(MemberDraft::new(
            self.name_input.value(),
            self.is_earning,
            salary,
        ))
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

pub fn render(frame: &mut Frame, app: &App, dialog: MemberDialog) {
    let (form, title) = match dialog {
        MemberDialog::Add => (&app.add_member_form, " Add Member "),
        MemberDialog::Edit => (&app.edit_member_form, " Edit Member "),
    };

    let area = centered_rect_fixed(56, 11, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
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
            Constraint::Length(1), // Name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Earning
            Constraint::Length(1), // Salary
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let mut name = form.name_input.clone();
    name.focused = form.focused_field == MemberField::Name;
    frame.render_widget(&name, chunks[0]);

    let earning_focused = form.focused_field == MemberField::Earning;
    let earning_style = if earning_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let earning_line = Line::from(vec![
        Span::styled("Earning member: ", earning_style),
        Span::styled(
            if form.is_earning { "[x] Yes" } else { "[ ] No" },
            Style::default().fg(Color::White),
        ),
        Span::styled(
            if earning_focused { " (Space to toggle)" } else { "" },
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(earning_line), chunks[2]);

    if form.is_earning {
        let mut salary = form.salary_input.clone();
        salary.focused = form.focused_field == MemberField::Salary;
        frame.render_widget(&salary, chunks[3]);
    }

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
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
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

/// Handle key input for a member dialog
pub fn handle_key(app: &mut App, key: KeyEvent, dialog: MemberDialog) {
    match key.code {
        KeyCode::Esc => match dialog {
            MemberDialog::Add => app.close_add_member(),
            MemberDialog::Edit => app.close_edit_member(),
        },
        KeyCode::Enter => match dialog {
            MemberDialog::Add => app.submit_add_member(),
            MemberDialog::Edit => app.submit_edit_member(),
        },
        _ => {
            let form = match dialog {
                MemberDialog::Add => &mut app.add_member_form,
                MemberDialog::Edit => &mut app.edit_member_form,
            };
            edit_form(form, key);
        }
    }
}

fn edit_form(form: &mut MemberFormState, key: KeyEvent) {
    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Char(' ') if form.focused_field == MemberField::Earning => {
            form.toggle_earning();
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
