//! Modal overlay frame.
//!
//! Geometry and content are independent: [`overlay_rect`] decides where the
//! box goes, an [`OverlayContent`] supplies each row by index, and
//! [`render_overlay`] wraps those rows in a border. Cells outside the box are
//! never written, so the panels underneath stay visible.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::action::Modal;
use crate::theme::Theme;

pub const QUEUE_MIN_WIDTH: u16 = 40;
pub const QUEUE_MIN_HEIGHT: u16 = 10;
pub const MENU_MIN_WIDTH: u16 = 40;
pub const MENU_MAX_WIDTH: u16 = 60;
pub const MENU_HEIGHT: u16 = 10;

/// Index-addressed rows of an overlay body.
pub trait OverlayContent {
    /// Row `index` of the body, at most `max_width` columns wide.
    fn content_line(&self, index: usize, max_width: usize, theme: &Theme) -> Line<'static>;
}

/// Centered box for `modal` on a `width`×`height` terminal.
pub fn overlay_rect(modal: Modal, width: u16, height: u16) -> Rect {
    let four_fifths = |n: u16| (u32::from(n) * 4 / 5) as u16;
    let (w, h) = match modal {
        Modal::QueueInspector => (
            four_fifths(width).max(QUEUE_MIN_WIDTH),
            four_fifths(height).max(QUEUE_MIN_HEIGHT),
        ),
        Modal::ContextMenu => ((width / 2).clamp(MENU_MIN_WIDTH, MENU_MAX_WIDTH), MENU_HEIGHT),
    };
    let (w, h) = (w.min(width), h.min(height));
    Rect {
        x: (width - w) / 2,
        y: (height - h) / 2,
        width: w,
        height: h,
    }
}

/// Number of body rows inside a box of `rect`.
pub fn body_height(rect: Rect) -> usize {
    rect.height.saturating_sub(2) as usize
}

/// Rows of the box at `rect`, top border first.
pub fn render_overlay(
    rect: Rect,
    content: &dyn OverlayContent,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let w = rect.width as usize;
    let h = rect.height as usize;
    if w < 4 || h < 2 {
        return Vec::new();
    }
    let inner = w - 4;
    let border = theme.border(true);
    let horizontal = "─".repeat(w - 2);

    let mut rows = Vec::with_capacity(h);
    rows.push(Line::from(Span::styled(format!("┌{}┐", horizontal), border)));
    for index in 0..body_height(rect) {
        let mut line = content.content_line(index, inner, theme);
        let pad = inner.saturating_sub(line.width());
        let mut spans = vec![Span::styled("│ ", border)];
        spans.append(&mut line.spans);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(" │", border));
        rows.push(Line::from(spans));
    }
    rows.push(Line::from(Span::styled(format!("└{}┘", horizontal), border)));
    rows
}
