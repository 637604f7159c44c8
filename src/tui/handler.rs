//! Event handler for the TUI
//!
//! Routes keyboard events to the topmost open dialog, the auth screens, or
//! the dashboard.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Screen};
use super::dialogs::{self, member::MemberDialog};
use super::event::Event;
use super::views;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.notifications.remove_expired();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    match app.screen {
        Screen::Login | Screen::Register => views::auth::handle_key(app, key),
        Screen::Dashboard if app.dialogs.any() => handle_dialog_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key),
    }
    Ok(())
}

/// Keys go to the dialog drawn last
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    let open = app.dialogs.clone();

    if open.help {
        app.dialogs.help = false;
    } else if open.confirm_delete {
        dialogs::confirm::handle_key(app, key);
    } else if open.add_expense {
        dialogs::expense::handle_key(app, key);
    } else if open.edit_member {
        dialogs::member::handle_key(app, key, MemberDialog::Edit);
    } else if open.add_member {
        dialogs::member::handle_key(app, key, MemberDialog::Add);
    } else if open.view_expenses {
        dialogs::view_expenses::handle_key(app, key);
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Enter => app.toggle_expanded(),

        KeyCode::Char('a') => app.open_add_member(),
        KeyCode::Char('e') => app.open_edit_member(),
        KeyCode::Char('x') => app.open_add_expense(),
        KeyCode::Char('v') => app.open_view_expenses(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),

        KeyCode::Char('r') => app.load_family(),
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
}
