//! Bounded scroll window shared by every list: playlists, tracks, search
//! results and the queue inspector.

/// Result of [`visible_range`]: items `start..end` are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
    pub offset: usize,
    /// A `[sel/total]` indicator line is reserved below the items.
    pub indicator: bool,
}

/// Rows available for items once the header (and, when the list overflows,
/// the indicator line) is taken out.
pub fn capacity(total: usize, height: usize, header_lines: usize) -> usize {
    let cap = height.saturating_sub(header_lines);
    if total > cap {
        cap.saturating_sub(1)
    } else {
        cap
    }
}

pub fn visible_range(
    total: usize,
    height: usize,
    header_lines: usize,
    selected: usize,
    mut offset: usize,
) -> VisibleRange {
    let cap = capacity(total, height, header_lines);
    let indicator = total > height.saturating_sub(header_lines);

    if cap == 0 || total == 0 {
        return VisibleRange {
            start: 0,
            end: 0,
            offset: 0,
            indicator,
        };
    }

    let selected = selected.min(total - 1);
    if selected < offset {
        offset = selected;
    } else if selected >= offset + cap {
        offset = selected + 1 - cap;
    }

    VisibleRange {
        start: offset,
        end: (offset + cap).min(total),
        offset,
        indicator,
    }
}

/// `[3/120]`
pub fn indicator_text(selected: usize, total: usize) -> String {
    format!("[{}/{}]", (selected + 1).min(total), total)
}
