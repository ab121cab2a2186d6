//! SearchInput: wraps tui-input for the sidebar search box.
//!
//! Enter and Esc never reach this widget; the navigator turns them into
//! `SubmitSearch` / `CancelSearch`.

use ratatui::crossterm::event::{Event, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::Theme;
use crate::widgets::pane_chrome::pane_chrome;

pub struct SearchInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Edit keys: characters, Backspace, cursor movement.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.input.handle_event(&Event::Key(key));
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = pane_chrome("Search", self.active, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();
        let span = if value.is_empty() && !self.active {
            Span::styled(format!("/ {}", self.placeholder), theme.muted())
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("/ {}", visible), Style::default().fg(theme.search_fg))
        };
        frame.render_widget(
            Paragraph::new(Line::from(span)).style(Style::default().bg(theme.search_bg)),
            inner,
        );

        if self.active {
            let x = inner.x + 2 + self.input.visual_cursor().saturating_sub(scroll) as u16;
            frame.set_cursor_position((x.min(inner.x + inner.width - 1), inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn press(input: &mut SearchInput, code: KeyCode) {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_and_backspace_edit_text() {
        let mut input = SearchInput::new("search");
        for c in "daft".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        press(&mut input, KeyCode::Char(' '));
        press(&mut input, KeyCode::Char('p'));
        assert_eq!(input.text(), "daft p");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.text(), "daft ");

        input.clear();
        assert_eq!(input.text(), "");
    }
}
