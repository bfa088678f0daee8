use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create main application layout: title bar, clip list, status bar
/// Returns [title_area, list_area, status_area]
pub fn create_main_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Clip list
            Constraint::Length(1), // Status / command bar
        ])
        .split(area);

    [chunks[0], chunks[1], chunks[2]]
}
