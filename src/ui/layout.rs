//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: summary header, input pane beside the results pane, and a
/// bottom status bar.
pub struct AppLayout {
    pub header_area: Rect,
    pub input_area: Rect,
    pub results_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // totals + view tabs
                Constraint::Min(6),    // panes
                Constraint::Length(1), // status bar
            ])
            .split(area);

        // Narrow terminals stack the panes instead of splitting sideways.
        let direction = if area.width >= 100 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let panes = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[1]);

        Self {
            header_area: rows[0],
            input_area: panes[0],
            results_area: panes[1],
            status_area: rows[2],
        }
    }
}
