//! Display-width aware truncation and padding.

use std::fmt::Display;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Longest error text kept in app state, in chars.
pub const ERROR_LINE_MAX: usize = 200;

/// Cut `s` to at most `max` columns, ending in `…` when something was lost.
pub fn truncate(s: &str, max: usize) -> String {
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
    out.push(ELLIPSIS);
    out
}

/// Truncate, then pad with spaces to exactly `width` columns.
pub fn fit(s: &str, width: usize) -> String {
    let mut out = truncate(s, width);
    let pad = width.saturating_sub(out.width());
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// One-line, bounded rendition of an error for the state machine.
pub fn error_line(err: impl Display) -> String {
    let text = err.to_string();
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= ERROR_LINE_MAX {
        return line;
    }
    let mut out: String = line.chars().take(ERROR_LINE_MAX - 1).collect();
    out.push(ELLIPSIS);
    out
}
