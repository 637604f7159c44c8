//! TUI views
//!
//! Screen dispatch, the dashboard and status bar, plus dialog and toast
//! overlays.

pub mod auth;
pub mod dashboard;
pub mod status_bar;

use ratatui::Frame;

use super::app::{App, Screen};
use super::dialogs;
use super::dialogs::member::MemberDialog;
use super::layout::{toast_rect, DashboardLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => auth::render_login(frame, app),
        Screen::Register => auth::render_register(frame, app),
        Screen::Dashboard => render_dashboard(frame, app),
    }

    if let Some(notification) = app.notifications.current() {
        frame.render_widget(NotificationWidget::new(notification), toast_rect(frame.area()));
    }
}

fn render_dashboard(frame: &mut Frame, app: &App) {
    let expanded = app.expanded_member_ref();
    let layout = DashboardLayout::new(frame.area(), expanded.is_some());

    match app.sync.family() {
        Some(family) => {
            dashboard::render_header(frame, app, family, layout.header);
            dashboard::render_members(frame, app, family, layout.members);
            if let (Some(member), Some(area)) = (expanded, layout.history) {
                dashboard::render_history(frame, app, member, area);
            }
        }
        None => dashboard::render_unloaded(frame, layout.members),
    }

    status_bar::render(frame, app, layout.status_bar);
    render_dialogs(frame, app);
}

/// Open dialogs are drawn bottom to top; the last one drawn gets the keys
fn render_dialogs(frame: &mut Frame, app: &App) {
    let open = &app.dialogs;

    if open.view_expenses {
        dialogs::view_expenses::render(frame, app);
    }
    if open.add_member {
        dialogs::member::render(frame, app, MemberDialog::Add);
    }
    if open.edit_member {
        dialogs::member::render(frame, app, MemberDialog::Edit);
    }
    if open.add_expense {
        dialogs::expense::render(frame, app);
    }
    if open.confirm_delete {
        if let Some(pending) = &app.pending_deletion {
            dialogs::confirm::render(frame, pending);
        }
    }
    if open.help {
        dialogs::help::render(frame);
    }
}
