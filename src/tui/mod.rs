//! Terminal User Interface module
//!
//! Interactive dashboard for a family's members and expenses, built on
//! ratatui. Login and registration screens come first when no session is
//! stored.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
