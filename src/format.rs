use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::metrics::Sample;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `0.423` → `"42.3%"`.
pub fn format_percent(sample: Sample) -> String {
    format!("{:.1}%", sample * 100.0)
}

/// Axis tick label with no decimals.
pub fn format_percent_short(sample: Sample) -> String {
    format!("{:.0}%", sample * 100.0)
}

pub fn format_interval_ms(ms: u128) -> String {
    if ms >= 1000 && ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}
