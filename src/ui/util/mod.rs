pub mod handler;

use std::time::{SystemTime, UNIX_EPOCH};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn get_active_lesson_icon(is_playing: bool) -> &'static str {
    if is_playing {
        const FRAME_STEP_MS: u128 = 100;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let step = (now / FRAME_STEP_MS) as usize % 6;

        match step {
            0 | 5 => "·",
            1 | 4 => "•",
            _ => "●",
        }
    } else {
        "•"
    }
}

/// Truncates or pads `text` to exactly `width` terminal columns.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - text.width()));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out.push_str(&" ".repeat(width - 1 - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_short_text() {
        assert_eq!(fit("abc", 5), "abc  ");
    }

    #[test]
    fn fit_truncates_by_display_width() {
        assert_eq!(fit("Numbers 1-10", 8), "Numbers…");
        // Wide glyphs take two columns each.
        let fitted = fit("日本語テキスト", 6);
        assert_eq!(fitted.width(), 6);
        assert!(fitted.ends_with('…') || fitted.ends_with(' '));
    }
}
