//! PaneChrome: bordered pane with focus styling.

use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::Theme;

/// Block for a pane titled `title`. Focus switches border and title colour.
pub fn pane_chrome<'a>(title: &str, focused: bool, theme: &Theme) -> Block<'a> {
    let title_style = if focused {
        theme.heading()
    } else {
        theme.muted()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            title_style,
        )))
}

/// Pane with an accent badge at the top right (e.g. `[3/120]`).
pub fn pane_chrome_with_badge<'a>(
    title: &str,
    badge: Option<String>,
    focused: bool,
    theme: &Theme,
) -> Block<'a> {
    let block = pane_chrome(title, focused, theme);
    match badge {
        Some(text) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", text),
                theme.secondary().add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
