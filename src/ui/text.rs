use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `width` columns
///
/// Longer text ends in "..." when at least 3 columns are available; narrower
/// slots get a row of dots instead.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width < ELLIPSIS.len() {
        return ".".repeat(width);
    }

    let budget = width - ELLIPSIS.len();
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Lay out `left` and right-aligned `right` in exactly `width` columns
/// `left` is truncated first; `right` is dropped if it cannot fit with a gap
pub fn fit_line(left: &str, right: &str, width: usize) -> String {
    let right_width = right.width();
    if right_width + 1 > width {
        return pad(&truncate(left, width), width);
    }

    let left_width = width - right_width - 1;
    let mut line = pad(&truncate(left, left_width), left_width);
    line.push(' ');
    line.push_str(right);
    line
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Format a byte count with one decimal in the largest fitting binary unit
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{}B", bytes)
    } else {
        format!("{:.1}{}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("clip", 10), "clip");
        assert_eq!(truncate("clip", 4), "clip");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("/footage/day1", 8), "/foot...");
        assert_eq!(truncate("abcdef", 3), "...");
    }

    #[test]
    fn test_truncate_narrow_placeholder() {
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(truncate("日本語の動画", 7), "日本...");
    }

    #[test]
    fn test_fit_line_right_aligns() {
        assert_eq!(fit_line("A", "1.0MB", 12), "A      1.0MB");
        assert_eq!(fit_line("long_stem_name", "1.0MB", 12), "lon... 1.0MB");
    }

    #[test]
    fn test_fit_line_drops_right_when_too_narrow() {
        assert_eq!(fit_line("abc", "1.0MB", 5), "abc  ");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1000), "1000B");
        assert_eq!(format_size(1024 * 1024), "1.0MB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0MB");
        assert_eq!(format_size(512 * 1024), "512.0KB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 / 2), "1.5GB");
    }
}
