//! Layout and text helpers shared by the page renderers.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Truncate `s` to at most `max` terminal cells, appending `…` when cut.
///
/// Details:
/// - Widths are measured with `unicode-width`, so wide glyphs count as two cells.
#[must_use]
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// What: Rectangle of `width_pct` percent width and `height` rows centered in `area`.
#[must_use]
pub fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(width_pct.min(100)) / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// What: First row to draw so that `selected` stays inside a viewport of `height` rows.
///
/// Details:
/// - Keeps the selection on the last visible line when scrolling down.
#[must_use]
pub fn scroll_offset(selected: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    let offset = selected.saturating_sub(height - 1);
    u16::try_from(offset).unwrap_or(u16::MAX)
}
