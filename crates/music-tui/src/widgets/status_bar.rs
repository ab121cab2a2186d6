//! Status bar: bottom line with the input mode and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Modal;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Queue,
    Menu,
}

impl InputMode {
    pub fn for_modal(modal: Option<Modal>, searching: bool) -> Self {
        match modal {
            Some(Modal::QueueInspector) => Self::Queue,
            Some(Modal::ContextMenu) => Self::Menu,
            None if searching => Self::Search,
            None => Self::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Queue => "QUEUE",
            Self::Menu => "MENU",
        }
    }

    pub fn color(self, theme: &Theme) -> Color {
        match self {
            Self::Normal => theme.mode_normal,
            Self::Search => theme.mode_search,
            Self::Queue | Self::Menu => theme.mode_modal,
        }
    }

    pub fn hints(self) -> &'static str {
        match self {
            Self::Normal => {
                "↑↓/jk select  Enter play  Space pause  n/p track  s shuffle  r repeat  +/- vol  ,/. seek  / search  Q queue  K menu  Tab/^W pane  q quit"
            }
            Self::Search => "type to search  Enter search  Esc cancel",
            Self::Queue => "↑↓ select  Enter play  u refresh  Esc close",
            Self::Menu => "↑↓ select  Enter choose  Esc cancel",
        }
    }
}

/// Draw the key-hint footer (one row). `chord` marks a pending `Ctrl+W`.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, chord: bool, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(mode.color(theme))
            .add_modifier(Modifier::BOLD),
    )];
    if chord {
        spans.push(Span::styled("^W ", theme.accent().add_modifier(Modifier::BOLD)));
    }
    spans.push(Span::styled(format!(" {}", mode.hints()), theme.muted()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_wins_over_search() {
        assert_eq!(InputMode::for_modal(None, false), InputMode::Normal);
        assert_eq!(InputMode::for_modal(None, true), InputMode::Search);
        assert_eq!(
            InputMode::for_modal(Some(Modal::ContextMenu), true),
            InputMode::Menu
        );
        assert_eq!(InputMode::Queue.label(), "QUEUE");
    }
}
