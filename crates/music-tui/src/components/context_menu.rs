//! Context menu for the highlighted track.

use music_proto::Track;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::action::{Action, MenuOption};
use crate::overlay::OverlayContent;
use crate::text::truncate;
use crate::theme::Theme;

const FIRST_OPTION_LINE: usize = 3;

#[derive(Debug, Default)]
pub struct ContextMenu {
    selected: usize,
    target: Option<(usize, Track)>,
}

impl ContextMenu {
    /// Aim the menu at entry `index` of the main panel.
    pub fn open(&mut self, index: usize, track: Track) {
        self.selected = 0;
        self.target = Some((index, track));
    }

    pub fn target(&self) -> Option<&(usize, Track)> {
        self.target.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('K') => vec![Action::CloseModal],
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(MenuOption::ALL.len() - 1);
                Vec::new()
            }
            KeyCode::Enter => vec![
                Action::CloseModal,
                Action::MenuChoice(MenuOption::ALL[self.selected]),
            ],
            _ => Vec::new(),
        }
    }
}

impl OverlayContent for ContextMenu {
    fn content_line(&self, index: usize, max_width: usize, theme: &Theme) -> Line<'static> {
        let Some((_, track)) = &self.target else {
            return Line::default();
        };
        let text = |s: String, style: Style| Line::from(Span::styled(truncate(&s, max_width), style));
        match index {
            0 => text(format!("Track: {}", track.name), theme.heading()),
            1 => text(format!("Artist: {}", track.artist), theme.secondary()),
            2 => Line::from(Span::styled("─".repeat(max_width), theme.separator())),
            i if (FIRST_OPTION_LINE..FIRST_OPTION_LINE + MenuOption::ALL.len()).contains(&i) => {
                let n = i - FIRST_OPTION_LINE;
                let option = MenuOption::ALL[n];
                if n == self.selected {
                    text(format!("▶ {}", option.label()), theme.selected(true))
                } else {
                    text(format!("  {}", option.label()), theme.text())
                }
            }
            7 => text("↑↓ select  Enter choose  Esc cancel".to_string(), theme.muted()),
            _ => Line::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn menu() -> ContextMenu {
        let mut menu = ContextMenu::default();
        menu.open(4, Track::new("B", "Intro", "M83", "Hurry Up", 332.0));
        menu
    }

    #[test]
    fn lists_track_and_options() {
        let menu = menu();
        let theme = Theme::default();
        let rows: Vec<String> = (0..8)
            .map(|i| {
                menu.content_line(i, 40, &theme)
                    .spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect()
            })
            .collect();

        assert_eq!(rows[0], "Track: Intro");
        assert_eq!(rows[1], "Artist: M83");
        assert_eq!(rows[3], "▶ Play");
        assert_eq!(rows[4], "  Play Next");
        assert_eq!(rows[5], "  Add To Queue");
        assert_eq!(rows[6], "");
    }

    #[test]
    fn choosing_an_option_closes_first() {
        let mut menu = menu();
        menu.handle_key(key(KeyCode::Down));
        menu.handle_key(key(KeyCode::Down));
        menu.handle_key(key(KeyCode::Down));

        assert_eq!(
            menu.handle_key(key(KeyCode::Enter)),
            vec![Action::CloseModal, Action::MenuChoice(MenuOption::AddToQueue)]
        );
        assert_eq!(menu.target().map(|(i, _)| *i), Some(4));
    }

    #[test]
    fn reopening_resets_cursor() {
        let mut menu = menu();
        menu.handle_key(key(KeyCode::Down));
        menu.open(0, Track::default());
        assert_eq!(
            menu.handle_key(key(KeyCode::Enter)),
            vec![Action::CloseModal, Action::MenuChoice(MenuOption::Play)]
        );
        assert_eq!(menu.handle_key(key(KeyCode::Esc)), vec![Action::CloseModal]);
    }
}
