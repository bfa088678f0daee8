use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use super::text::{fit_line, truncate};
use crate::models::Model;

/// Title bar text: both directories on the left, counts on the right
pub fn title_text(model: &Model, width: usize) -> String {
    let counts = format!("{} clips, {} marked", model.len(), model.marked_count());
    let mode = if model.is_read_only() { " [read-only]" } else { "" };
    let right = format!("{counts}{mode}");

    // Each path gets half of what the counts leave, minus the " | " separator
    let available = width.saturating_sub(right.len() + 1);
    let half = available.saturating_sub(3) / 2;
    let raw = truncate(&model.raw_dir().display().to_string(), half);
    let preview = truncate(&model.preview_dir().display().to_string(), half);

    fit_line(&format!("{raw} | {preview}"), &right, width)
}

/// Render the title bar
pub fn render_title_bar(frame: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let text = title_text(model, area.width as usize);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, theme.title))), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model(raw: &str, preview: &str, read_only: bool) -> Model {
        Model::new(Vec::new(), PathBuf::from(raw), PathBuf::from(preview), read_only)
    }

    #[test]
    fn test_title_fits_width() {
        let m = model("/footage/day1", "/footage/day1_s", false);
        let text = title_text(&m, 60);
        assert_eq!(text.len(), 60);
        assert!(text.starts_with("/footage/day1 | /footage/day1_s"));
        assert!(text.ends_with("0 clips, 0 marked"));
    }

    #[test]
    fn test_title_ellipsizes_paths() {
        let m = model(
            "/very/long/path/to/the/footage/day1",
            "/very/long/path/to/the/footage/day1_s",
            true,
        );
        let text = title_text(&m, 50);
        assert_eq!(text.len(), 50);
        assert!(text.contains("..."));
        assert!(text.ends_with("[read-only]"));
    }
}
