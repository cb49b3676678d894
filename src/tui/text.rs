//! Display-width helpers shared by the components.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` terminal cells, ending in `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Rating with one decimal, e.g. `★ 4.5`.
pub fn rating_label(rating: f32) -> String {
    format!("★ {rating:.1}")
}
