use ratatui::prelude::*;
use std::str::FromStr;

use crate::app::ModeKind;
use crate::models::Clip;
use crate::storage::ThemeConfig;

/// Theme errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Invalid color for theme.{field}: {value:?}")]
    InvalidColor { field: &'static str, value: String },
}

/// Runtime theme for the review screen
#[derive(Debug, Clone)]
pub struct Theme {
    // === Cursor Highlights ===
    pub normal_highlight: Color,
    pub play_highlight: Color,

    // === Clip State ===
    pub marked: Color,

    // === Bars ===
    pub title: Style,
    pub status: Style,
    pub status_mode: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::with_colors(Color::Blue, Color::Green, Color::Red, Color::Cyan, Color::White)
    }
}

impl Theme {
    fn with_colors(normal: Color, play: Color, marked: Color, title: Color, status: Color) -> Self {
        Theme {
            normal_highlight: normal,
            play_highlight: play,
            marked,
            title: Style::default().fg(title).add_modifier(Modifier::REVERSED),
            status: Style::default().fg(status).add_modifier(Modifier::REVERSED),
            status_mode: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        }
    }

    /// Build a theme from configured color names
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ThemeError> {
        Ok(Theme::with_colors(
            parse_color("normal_highlight", &config.normal_highlight)?,
            parse_color("play_highlight", &config.play_highlight)?,
            parse_color("marked", &config.marked)?,
            parse_color("title", &config.title)?,
            parse_color("status", &config.status)?,
        ))
    }

    /// Cursor color for the active mode
    pub fn highlight(&self, mode: ModeKind) -> Color {
        match mode {
            ModeKind::Normal => self.normal_highlight,
            ModeKind::Play => self.play_highlight,
        }
    }

    /// Style for one clip row
    ///
    /// Unplayed clips are bold. The cursor row is reverse video in the mode
    /// color, or in the marked color when the clip is marked for deletion.
    pub fn row_style(&self, clip: &Clip, is_cursor: bool, mode: ModeKind) -> Style {
        let mut style = Style::default();
        if !clip.played {
            style = style.add_modifier(Modifier::BOLD);
        }

        if is_cursor {
            let color = if clip.marked_for_deletion {
                self.marked
            } else {
                self.highlight(mode)
            };
            style.fg(color).add_modifier(Modifier::REVERSED)
        } else if clip.marked_for_deletion {
            style.fg(self.marked)
        } else {
            style
        }
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, ThemeError> {
    Color::from_str(value).map_err(|_| ThemeError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn clip(played: bool, marked: bool) -> Clip {
        let mut clip = Clip::new(
            "A".to_string(),
            PathBuf::from("A.MTS"),
            PathBuf::from("A.mov"),
            0,
        );
        clip.played = played;
        clip.marked_for_deletion = marked;
        clip
    }

    #[test]
    fn test_default_config_matches_default_theme() {
        let theme = Theme::from_config(&ThemeConfig::default()).unwrap();
        assert_eq!(theme.normal_highlight, Theme::default().normal_highlight);
        assert_eq!(theme.marked, Color::Red);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let config = ThemeConfig {
            marked: "not-a-color".to_string(),
            ..ThemeConfig::default()
        };
        let err = Theme::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("theme.marked"));
    }

    #[test]
    fn test_cursor_row_uses_mode_color() {
        let theme = Theme::default();
        let normal = theme.row_style(&clip(true, false), true, ModeKind::Normal);
        let play = theme.row_style(&clip(true, false), true, ModeKind::Play);
        assert_eq!(normal.fg, Some(Color::Blue));
        assert_eq!(play.fg, Some(Color::Green));
        assert!(normal.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_marked_overrides_highlight() {
        let theme = Theme::default();
        let style = theme.row_style(&clip(true, true), true, ModeKind::Play);
        assert_eq!(style.fg, Some(Color::Red));
    }

    #[test]
    fn test_unplayed_is_bold() {
        let theme = Theme::default();
        let style = theme.row_style(&clip(false, false), false, ModeKind::Normal);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(!style.add_modifier.contains(Modifier::REVERSED));
        let played = theme.row_style(&clip(true, false), false, ModeKind::Normal);
        assert!(!played.add_modifier.contains(Modifier::BOLD));
    }
}
