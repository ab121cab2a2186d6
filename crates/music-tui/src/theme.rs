//! Colours and styles, built once and handed to every renderer.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub accent: Color,
    pub playing: Color,
    pub paused: Color,
    pub error: Color,
    pub muted: Color,
    pub separator: Color,
    pub secondary: Color,
    pub primary: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub overlay_bg: Color,
    pub search_bg: Color,
    pub search_fg: Color,
    pub mode_normal: Color,
    pub mode_search: Color,
    pub mode_modal: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 18),
            accent: Color::Rgb(250, 45, 72),
            playing: Color::Rgb(80, 200, 120),
            paused: Color::Rgb(255, 184, 80),
            error: Color::Rgb(255, 80, 80),
            muted: Color::Rgb(72, 72, 88),
            separator: Color::Rgb(40, 40, 52),
            secondary: Color::Rgb(115, 115, 138),
            primary: Color::Rgb(210, 210, 225),
            selection_bg: Color::Rgb(28, 28, 40),
            border: Color::Rgb(40, 40, 52),
            border_focused: Color::Rgb(250, 45, 72),
            overlay_bg: Color::Rgb(18, 18, 26),
            search_bg: Color::Rgb(20, 20, 32),
            search_fg: Color::Rgb(255, 200, 80),
            mode_normal: Color::Rgb(115, 115, 138),
            mode_search: Color::Rgb(255, 200, 80),
            mode_modal: Color::Rgb(250, 45, 72),
        }
    }
}

impl Theme {
    pub fn text(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn separator(&self) -> Style {
        Style::default().fg(self.separator)
    }

    pub fn selected(&self, focused: bool) -> Style {
        let style = Style::default().bg(self.selection_bg).fg(self.primary);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
