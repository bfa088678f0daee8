use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use super::text::fit_line;
use crate::app::ModeKind;

/// Context for rendering the status / command bar
pub struct StatusBarContext<'a> {
    pub mode: ModeKind,
    /// Pending input buffer, or the transient message when the buffer is empty
    pub text: &'a str,
    /// Diagnostic label of the last key received
    pub last_key: &'a str,
    pub theme: &'a Theme,
}

/// Render mode name, buffer/message and last key code
pub fn render_status_bar(frame: &mut Frame, area: Rect, ctx: StatusBarContext) {
    let mode_label = format!(" {} ", ctx.mode.name());
    let rest_width = (area.width as usize).saturating_sub(mode_label.len() + 1);
    let key_label = format!("key: {}", ctx.last_key);
    let body = fit_line(ctx.text, &key_label, rest_width);

    let mode_style = ctx.theme.status_mode.fg(ctx.theme.highlight(ctx.mode));
    let line = Line::from(vec![
        Span::styled(mode_label, mode_style),
        Span::styled(" ", ctx.theme.status),
        Span::styled(body, ctx.theme.status),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_status_bar_layout() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();

        terminal
            .draw(|frame| {
                let ctx = StatusBarContext {
                    mode: ModeKind::Play,
                    text: ":wq",
                    last_key: "113",
                    theme: &theme,
                };
                render_status_bar(frame, frame.area(), ctx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..40u16).map(|x| buffer[(x, 0u16)].symbol()).collect();
        assert!(text.starts_with(" PLAY  :wq"));
        assert!(text.ends_with("key: 113"));
        assert_eq!(buffer[(1u16, 0u16)].fg, Color::Green);
    }
}
