//! Login and registration screens

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{App, Screen};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Buffer of the login form
#[derive(Debug, Clone)]
pub struct LoginFormState {
    pub focused: usize,
    pub name_input: TextInput,
    pub password_input: TextInput,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            focused: 0,
            name_input: TextInput::new().label("Family name"),
            password_input: TextInput::new().label("Password").masked(),
        }
    }
}

impl LoginFormState {
    fn inputs_mut(&mut self) -> [&mut TextInput; 2] {
        [&mut self.name_input, &mut self.password_input]
    }
}

/// Buffer of the registration form
#[derive(Debug, Clone)]
pub struct RegisterFormState {
    pub focused: usize,
    pub name_input: TextInput,
    pub password_input: TextInput,
    pub confirm_input: TextInput,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            focused: 0,
            name_input: TextInput::new().label("Family name"),
            password_input: TextInput::new().label("Password").masked(),
            confirm_input: TextInput::new().label("Confirm password").masked(),
        }
    }
}

impl RegisterFormState {
    fn inputs_mut(&mut self) -> [&mut TextInput; 3] {
        [
            &mut self.name_input,
            &mut self.password_input,
            &mut self.confirm_input,
        ]
    }
}

fn render_form(frame: &mut Frame, title: &str, inputs: &[&TextInput], focused: usize, switch_hint: &str) {
    let height = inputs.len() as u16 + 8;
    let area = centered_rect_fixed(60, height, frame.area());

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(inputs.iter().map(|_| Constraint::Length(1)));
    constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        });

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Household Expense Tracker",
            Style::default().fg(Color::Yellow),
        )),
        chunks[0],
    );

    for (i, input) in inputs.iter().enumerate() {
        let mut input = (*input).clone();
        input.focused = i == focused;
        frame.render_widget(&input, chunks[i + 1]);
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Submit  "),
        Span::styled("[Tab]", Style::default().fg(Color::White)),
        Span::raw(" Next  "),
        Span::styled("[F2]", Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {}  ", switch_hint)),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[inputs.len() + 2]);
}

pub fn render_login(frame: &mut Frame, app: &App) {
    let form = &app.login_form;
    render_form(
        frame,
        "Login",
        &[&form.name_input, &form.password_input],
        form.focused,
        "Register",
    );
}

pub fn render_register(frame: &mut Frame, app: &App) {
    let form = &app.register_form;
    render_form(
        frame,
        "Register Family",
        &[&form.name_input, &form.password_input, &form.confirm_input],
        form.focused,
        "Login",
    );
}

fn cycle(focused: &mut usize, len: usize, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            *focused = (*focused + len - 1) % len;
        }
        KeyCode::BackTab | KeyCode::Up => *focused = (*focused + len - 1) % len,
        KeyCode::Tab | KeyCode::Down => *focused = (*focused + 1) % len,
        _ => return false,
    }
    true
}

/// Keys on the login and register screens
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.quit(),
        KeyCode::F(2) => return app.switch_auth_screen(),
        KeyCode::Enter => {
            return match app.screen {
                Screen::Register => app.submit_register(),
                _ => app.submit_login(),
            }
        }
        _ => {}
    }

    match app.screen {
        Screen::Register => {
            let form = &mut app.register_form;
            if !cycle(&mut form.focused, 3, key) {
                let focused = form.focused;
                form.inputs_mut()[focused].handle_key(key);
            }
        }
        _ => {
            let form = &mut app.login_form;
            if !cycle(&mut form.focused, 2, key) {
                let focused = form.focused;
                form.inputs_mut()[focused].handle_key(key);
            }
        }
    }
}
