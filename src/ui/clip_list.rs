use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use super::text::{fit_line, format_size};
use crate::app::ModeKind;
use crate::models::Clip;

/// Context for rendering the clip list
pub struct ClipListRenderContext<'a> {
    pub cursor: usize,
    pub top: usize,
    pub mode: ModeKind,
    pub theme: &'a Theme,
}

/// Two-column status glyph: `D` when marked for deletion, `*` when unplayed
fn status_glyph(clip: &Clip) -> String {
    let marked = if clip.marked_for_deletion { 'D' } else { ' ' };
    let unplayed = if clip.played { ' ' } else { '*' };
    format!("{marked}{unplayed}")
}

/// Text of one clip row, exactly `width` columns wide
pub fn row_text(clip: &Clip, width: usize) -> String {
    let left = format!("{} {}", status_glyph(clip), clip.stem);
    fit_line(&left, &format_size(clip.preview_size_bytes), width)
}

/// Render the visible window of the clip list starting at `ctx.top`
pub fn render_clip_list(frame: &mut Frame, area: Rect, clips: &[Clip], ctx: ClipListRenderContext) {
    let width = area.width as usize;

    if clips.is_empty() {
        frame.render_widget(Paragraph::new("No clips"), area);
        return;
    }

    let lines: Vec<Line> = clips
        .iter()
        .enumerate()
        .skip(ctx.top)
        .take(area.height as usize)
        .map(|(i, clip)| {
            let style = ctx.theme.row_style(clip, i == ctx.cursor, ctx.mode);
            Line::from(Span::styled(row_text(clip, width), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn clips(n: usize) -> Vec<Clip> {
        (0..n)
            .map(|i| {
                let stem = format!("clip{i}");
                Clip::new(
                    stem.clone(),
                    PathBuf::from(format!("{stem}.MTS")),
                    PathBuf::from(format!("{stem}.mov")),
                    1024 * 1024,
                )
            })
            .collect()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_row_text_glyphs() {
        let mut clip = clips(1).remove(0);
        assert_eq!(row_text(&clip, 20), " * clip0       1.0MB");
        clip.played = true;
        clip.marked_for_deletion = true;
        assert_eq!(row_text(&clip, 20), "D  clip0       1.0MB");
    }

    #[test]
    fn test_renders_window_from_top() {
        let clips = clips(10);
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();

        terminal
            .draw(|frame| {
                let ctx = ClipListRenderContext {
                    cursor: 5,
                    top: 4,
                    mode: ModeKind::Normal,
                    theme: &theme,
                };
                render_clip_list(frame, frame.area(), &clips, ctx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!(row(buffer, 0).contains("clip4"));
        assert!(row(buffer, 1).contains("clip5"));
        assert!(row(buffer, 2).contains("clip6"));
        assert!(buffer[(0u16, 1u16)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(0u16, 0u16)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_empty_list_placeholder() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| {
                let ctx = ClipListRenderContext {
                    cursor: 0,
                    top: 0,
                    mode: ModeKind::Normal,
                    theme: &theme,
                };
                render_clip_list(frame, frame.area(), &[], ctx);
            })
            .unwrap();
        assert!(row(terminal.backend().buffer(), 0).starts_with("No clips"));
    }
}
