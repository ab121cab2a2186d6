//! Smooth Unicode progress bar widget.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use music_proto::model::format_duration;

use crate::theme::Theme;

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// `width` cells filled to `progress` (0.0..=1.0), eighth-cell resolution.
pub fn bar(progress: f64, width: usize) -> String {
    let eighths = (progress.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full = eighths / 8;
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat('█').take(full));
    if full < width {
        out.push(BLOCKS[eighths % 8]);
        out.extend(std::iter::repeat(' ').take(width - full - 1));
    }
    out
}

/// `1:02 ███▌      3:45`
pub fn draw_progress(frame: &mut Frame, area: Rect, position: f64, duration: f64, theme: &Theme) {
    if area.width < 4 || area.height == 0 {
        return;
    }
    let left = format_duration(position);
    let right = format_duration(duration);
    let labels = (left.len() + right.len() + 2) as u16;
    let bar_w = area.width.saturating_sub(labels).max(4) as usize;
    let progress = if duration > 0.0 { position / duration } else { 0.0 };

    let line = Line::from(vec![
        Span::styled(format!("{} ", left), theme.secondary()),
        Span::styled(bar(progress, bar_w), ratatui::style::Style::default().fg(theme.playing)),
        Span::styled(format!(" {}", right), theme.muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
