//! Layout definitions for the TUI
//!
//! Dashboard regions plus helpers for centering dialogs.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions of the dashboard
pub struct DashboardLayout {
    /// Family name and totals
    pub header: Rect,
    /// Member table
    pub members: Rect,
    /// Inline expense history of the expanded member
    pub history: Option<Rect>,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect, show_history: bool) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(5),    // Members (+ history)
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let (members, history) = if show_history {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(vertical[1]);
            (split[0], Some(split[1]))
        } else {
            (vertical[1], None)
        };

        Self {
            header: vertical[0],
            members,
            history,
            status_bar: vertical[2],
        }
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Area for the toast in the top-right corner
pub fn toast_rect(r: Rect) -> Rect {
    let width = 44.min(r.width);
    let height = 4.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_split_only_when_expanded() {
        let area = Rect::new(0, 0, 100, 40);
        assert!(DashboardLayout::new(area, false).history.is_none());

        let layout = DashboardLayout::new(area, true);
        let history = layout.history.unwrap();
        assert_eq!(layout.members.y + layout.members.height, history.y);
        assert_eq!(layout.status_bar.height, 1);
    }

    #[test]
    fn test_fixed_rect_clamped_to_area() {
        let rect = centered_rect_fixed(80, 20, Rect::new(0, 0, 40, 10));
        assert_eq!(rect, Rect::new(0, 0, 40, 10));
        assert_eq!(toast_rect(Rect::new(0, 0, 100, 30)).x, 56);
    }
}
