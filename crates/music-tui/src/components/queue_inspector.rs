//! Queue inspector overlay: what plays next, and jumping to it.

use music_proto::model::format_duration;
use music_proto::{QueueEntry, QueueSnapshot};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::action::Action;
use crate::app_state::{AppState, Loadable};
use crate::overlay::OverlayContent;
use crate::text::{fit, truncate};
use crate::theme::Theme;
use crate::viewport::{indicator_text, visible_range};

pub const HEADER_LINES: usize = 7;

/// Cursor over the upcoming entries. Reset every time the overlay opens.
#[derive(Debug, Default)]
pub struct QueueInspector {
    selected: usize,
    offset: usize,
    height: usize,
}

impl QueueInspector {
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Record the body height and clamp the cursor to `count` entries.
    pub fn sync(&mut self, height: usize, count: usize) {
        self.height = height;
        self.selected = self.selected.min(count.saturating_sub(1));
        self.offset = visible_range(count, height, HEADER_LINES, self.selected, self.offset).offset;
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let upcoming = upcoming(state);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => vec![Action::CloseModal],
            KeyCode::Char('u') => vec![Action::RefreshQueue],
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                self.sync(self.height, upcoming.len());
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < upcoming.len() {
                    self.selected += 1;
                }
                self.sync(self.height, upcoming.len());
                Vec::new()
            }
            KeyCode::Enter => match upcoming.get(self.selected) {
                Some(entry) => vec![Action::CloseModal, Action::QueueJump(entry.position)],
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    pub fn view<'a>(&'a self, state: &'a AppState) -> QueueView<'a> {
        QueueView {
            inspector: self,
            snapshot: &state.queue,
            upcoming: upcoming(state),
            queue_name: &state.queue_name,
        }
    }
}

fn upcoming(state: &AppState) -> Vec<&QueueEntry> {
    state
        .queue
        .ready()
        .map(|s| s.upcoming().collect())
        .unwrap_or_default()
}

pub struct QueueView<'a> {
    inspector: &'a QueueInspector,
    snapshot: &'a Loadable<QueueSnapshot>,
    upcoming: Vec<&'a QueueEntry>,
    queue_name: &'a str,
}

impl QueueView<'_> {
    fn title(&self, snapshot: &QueueSnapshot) -> String {
        if snapshot.is_managed(self.queue_name) {
            format!("🎵 {} ({} tracks)", snapshot.name, snapshot.total_tracks)
        } else {
            format!("Current Playlist: {}", snapshot.name)
        }
    }

    fn entry_line(&self, slot: usize, max_width: usize, theme: &Theme) -> Line<'static> {
        let range = visible_range(
            self.upcoming.len(),
            self.inspector.height,
            HEADER_LINES,
            self.inspector.selected,
            self.inspector.offset,
        );
        let index = range.start + slot;
        if index < range.end {
            let entry = self.upcoming[index];
            let selected = index == self.inspector.selected;
            let marker = if selected { "▶" } else { " " };
            let left = format!(
                "{} {:>3}. {} - {}",
                marker, entry.position, entry.track.name, entry.track.artist
            );
            let text = format!(
                "{}{:>6}",
                fit(&left, max_width.saturating_sub(6)),
                format_duration(entry.track.duration)
            );
            let style = if selected { theme.selected(true) } else { theme.text() };
            return Line::from(Span::styled(text, style));
        }
        if index == range.end && range.indicator {
            return Line::from(Span::styled(
                indicator_text(self.inspector.selected, self.upcoming.len()),
                theme.muted(),
            ));
        }
        Line::default()
    }
}

impl OverlayContent for QueueView<'_> {
    fn content_line(&self, index: usize, max_width: usize, theme: &Theme) -> Line<'static> {
        let snapshot = match self.snapshot {
            Loadable::Loading => {
                return match index {
                    0 => Line::from(Span::styled("Queue", theme.heading())),
                    2 => Line::from(Span::styled("Loading queue…", theme.muted())),
                    _ => Line::default(),
                }
            }
            Loadable::Failed(e) => {
                return match index {
                    0 => Line::from(Span::styled("Queue", theme.heading())),
                    2 => Line::from(Span::styled(truncate(e, max_width), theme.error())),
                    4 => Line::from(Span::styled("u retry  Esc close", theme.muted())),
                    _ => Line::default(),
                }
            }
            Loadable::Ready(s) => s,
        };

        let text = |s: String, style: Style| Line::from(Span::styled(truncate(&s, max_width), style));
        match index {
            0 => text(self.title(snapshot), theme.heading()),
            2 => match &snapshot.current_track {
                Some(t) => text(
                    format!("Now Playing: {} - {} ({})", t.name, t.artist, snapshot.current_position),
                    theme.accent(),
                ),
                None => text("Nothing playing".to_string(), theme.muted()),
            },
            3 => Line::from(Span::styled("─".repeat(max_width), theme.separator())),
            4 => text(
                "↑↓ select  Enter play (disables shuffle)  u refresh  Esc close".to_string(),
                theme.muted(),
            ),
            6 => text("Upcoming Tracks in Queue:".to_string(), theme.secondary()),
            i if i >= HEADER_LINES => {
                if self.upcoming.is_empty() {
                    if i == HEADER_LINES {
                        return text("  (no upcoming tracks)".to_string(), theme.muted());
                    }
                    return Line::default();
                }
                self.entry_line(i - HEADER_LINES, max_width, theme)
            }
            _ => Line::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use music_proto::Track;
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    fn snapshot(name: &str, total: usize, current: usize) -> QueueSnapshot {
        let tracks: Vec<QueueEntry> = (1..=total)
            .map(|i| QueueEntry {
                position: i,
                track: Track::new("", format!("track{i}"), "Artist", "Album", 60.0),
            })
            .collect();
        QueueSnapshot {
            name: name.to_string(),
            total_tracks: total,
            current_track: tracks.get(current.wrapping_sub(1)).map(|e| e.track.clone()),
            tracks,
            current_position: current,
        }
    }

    fn state_with(snapshot: QueueSnapshot) -> AppState {
        let mut state = AppState::new("amtui Queue", Duration::from_secs(30));
        state.queue = Loadable::Ready(snapshot);
        state
    }

    fn body(inspector: &QueueInspector, state: &AppState, rows: usize) -> Vec<String> {
        let theme = Theme::default();
        let view = inspector.view(state);
        (0..rows)
            .map(|i| {
                view.content_line(i, 50, &theme)
                    .spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect()
            })
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn managed_queue_layout() {
        let state = state_with(snapshot("amtui Queue", 5, 2));
        let mut inspector = QueueInspector::default();
        inspector.sync(20, 3);

        let rows = body(&inspector, &state, 11);

        assert_eq!(rows[0], "🎵 amtui Queue (5 tracks)");
        assert_eq!(rows[2], "Now Playing: track2 - Artist (2)");
        assert_eq!(rows[6], "Upcoming Tracks in Queue:");
        assert!(rows[7].starts_with("▶   3. track3"));
        assert!(rows[8].starts_with("    4. track4"));
        assert!(rows[9].starts_with("    5. track5"));
        assert_eq!(rows[10], "");
    }

    #[test]
    fn other_playlist_title() {
        let state = state_with(snapshot("Road Trip", 3, 0));
        let inspector = QueueInspector::default();
        let rows = body(&inspector, &state, 8);
        assert_eq!(rows[0], "Current Playlist: Road Trip");
        assert_eq!(rows[2], "Nothing playing");
    }

    #[test]
    fn enter_jumps_to_highlighted_position() {
        let state = state_with(snapshot("amtui Queue", 5, 2));
        let mut inspector = QueueInspector::default();
        inspector.sync(20, 3);

        inspector.handle_key(key(KeyCode::Down), &state);
        inspector.handle_key(key(KeyCode::Down), &state);
        inspector.handle_key(key(KeyCode::Down), &state);

        assert_eq!(
            inspector.handle_key(key(KeyCode::Enter), &state),
            vec![Action::CloseModal, Action::QueueJump(5)]
        );
    }

    #[test]
    fn scrolls_with_indicator() {
        let state = state_with(snapshot("amtui Queue", 30, 1));
        let mut inspector = QueueInspector::default();
        // 12 rows - 7 header = 5, minus indicator = 4 entries.
        inspector.sync(12, 29);
        for _ in 0..6 {
            inspector.handle_key(key(KeyCode::Char('j')), &state);
        }

        let rows = body(&inspector, &state, 12);

        assert!(rows[7].starts_with("    5. track5"), "{rows:?}");
        assert!(rows[10].starts_with("▶   8. track8"));
        assert_eq!(rows[11], "[7/29]");
    }

    #[test]
    fn close_and_refresh_keys() {
        let state = state_with(snapshot("amtui Queue", 1, 1));
        let mut inspector = QueueInspector::default();
        assert_eq!(inspector.handle_key(key(KeyCode::Esc), &state), vec![Action::CloseModal]);
        assert_eq!(inspector.handle_key(key(KeyCode::Char('Q')), &state), vec![Action::CloseModal]);
        assert_eq!(inspector.handle_key(key(KeyCode::Char('u')), &state), vec![Action::RefreshQueue]);
        // Nothing upcoming: Enter does nothing.
        assert!(inspector.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn failed_fetch_shows_error() {
        let mut state = AppState::new("amtui Queue", Duration::from_secs(30));
        state.queue = Loadable::Failed("Music app is not running".into());
        let rows = body(&QueueInspector::default(), &state, 5);
        assert_eq!(rows[2], "Music app is not running");
    }
}
