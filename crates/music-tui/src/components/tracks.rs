//! Main panel: tracks of the chosen playlist or search results.

use music_proto::model::format_duration;
use music_proto::Track;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::action::PanelId;
use crate::app_state::MainContent;
use crate::component::{Component, RenderCtx};
use crate::text::{fit, truncate};
use crate::viewport::{indicator_text, visible_range};

pub const HEADER_LINES: usize = 3;
const DURATION_WIDTH: usize = 6;

/// Column widths (name, artist, album) for a row of `width` cells.
pub fn columns(width: usize) -> (usize, usize, usize) {
    let rest = width.saturating_sub(DURATION_WIDTH + 3);
    let name = rest * 40 / 100;
    let artist = rest * 30 / 100;
    (name, artist, rest - name - artist)
}

fn row(name: &str, artist: &str, album: &str, duration: &str, width: usize) -> String {
    let (nw, aw, bw) = columns(width);
    format!(
        "{} {} {} {:>dw$}",
        fit(name, nw),
        fit(artist, aw),
        fit(album, bw),
        duration,
        dw = DURATION_WIDTH
    )
}

pub struct TracksPanel;

impl TracksPanel {
    fn table(
        &self,
        ctx: &RenderCtx,
        title: String,
        tracks: &[Track],
        empty: &'static str,
        width: usize,
        height: usize,
    ) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let mut lines = vec![
            Line::from(Span::styled(truncate(&title, width), theme.heading())),
            Line::from(Span::styled(
                row("Name", "Artist", "Album", "Time", width),
                theme.secondary(),
            )),
            Line::from(Span::styled("─".repeat(width), theme.separator())),
        ];
        if tracks.is_empty() {
            lines.push(Line::from(Span::styled(format!("  {}", empty), theme.muted())));
            return lines;
        }

        let cursor = ctx.nav.cursor(PanelId::Tracks);
        let range = visible_range(tracks.len(), height, HEADER_LINES, cursor.selected, cursor.offset);
        let focused = self.focused(ctx);
        let playing = ctx.state.current_track_id();
        for (i, track) in tracks.iter().enumerate().take(range.end).skip(range.start) {
            let text = row(
                &track.name,
                &track.artist,
                &track.album,
                &format_duration(track.duration),
                width,
            );
            let style = if i == cursor.selected {
                theme.selected(focused)
            } else if playing.is_some_and(|id| !id.is_empty() && id == track.id) {
                Style::default().fg(theme.playing)
            } else {
                theme.text()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
        if range.indicator {
            lines.push(Line::from(Span::styled(
                indicator_text(cursor.selected, tracks.len()),
                theme.muted(),
            )));
        }
        lines
    }
}

impl Component for TracksPanel {
    fn title(&self, _ctx: &RenderCtx) -> String {
        PanelId::Tracks.label().to_string()
    }

    fn focused(&self, ctx: &RenderCtx) -> bool {
        ctx.nav.is_focused(PanelId::Tracks)
    }

    fn badge(&self, ctx: &RenderCtx) -> Option<String> {
        match ctx.state.main.tracks().len() {
            0 => None,
            n => Some(format!("{} tracks", n)),
        }
    }

    fn lines(&self, ctx: &RenderCtx, width: usize, height: usize) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        match &ctx.state.main {
            MainContent::Welcome => vec![
                Line::from(Span::styled("Welcome to amtui", theme.heading())),
                Line::from(""),
                Line::from(Span::styled(
                    truncate("Pick a playlist on the left, or press / to search.", width),
                    theme.secondary(),
                )),
            ],
            MainContent::Loading(name) => vec![Line::from(Span::styled(
                truncate(&format!("Loading {}…", name), width),
                theme.muted(),
            ))],
            MainContent::Searching(query) => vec![Line::from(Span::styled(
                truncate(&format!("Searching for \"{}\"…", query), width),
                theme.muted(),
            ))],
            MainContent::Error { title, message } => vec![
                Line::from(Span::styled(truncate(title, width), theme.error())),
                Line::from(""),
                Line::from(Span::styled(truncate(message, width), theme.secondary())),
            ],
            MainContent::Playlist(p) => self.table(
                ctx,
                p.name.clone(),
                &p.tracks,
                "(empty playlist)",
                width,
                height,
            ),
            MainContent::SearchResults { query, tracks } => self.table(
                ctx,
                format!("Search Results for: \"{}\"", query),
                tracks,
                "No results",
                width,
                height,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use music_proto::Playlist;

    use super::*;
    use crate::app_state::AppState;
    use crate::navigation::{default_layout, Navigator};
    use crate::theme::Theme;
    use unicode_width::UnicodeWidthStr;

    fn render(state: &AppState, nav: &Navigator, width: usize, height: usize) -> Vec<String> {
        let theme = Theme::default();
        let ctx = RenderCtx { state, nav, theme: &theme };
        TracksPanel
            .lines(&ctx, width, height)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn columns_split_forty_thirty_thirty() {
        assert_eq!(columns(109), (40, 30, 30));
        let (n, a, b) = columns(50);
        assert_eq!(n + a + b + DURATION_WIDTH + 3, 50);
    }

    #[test]
    fn rows_fill_the_width_exactly() {
        let line = row("東京事変 - 能動的三分間", "Tokyo Incidents", "Variety", "3:02", 60);
        assert_eq!(line.width(), 60);
        assert!(line.ends_with("  3:02"));
    }

    #[test]
    fn search_results_title_and_rows() {
        let mut state = AppState::new("amtui Queue", Duration::from_secs(30));
        state.main = MainContent::SearchResults {
            query: "intro".into(),
            tracks: vec![Track::new("A", "Intro", "The xx", "xx", 128.0)],
        };
        let nav = Navigator::new(default_layout());

        let rows = render(&state, &nav, 60, 10);

        assert_eq!(rows[0], "Search Results for: \"intro\"");
        assert!(rows[1].starts_with("Name"));
        assert!(rows[3].starts_with("Intro"));
        assert!(rows[3].ends_with("2:08"));
    }

    #[test]
    fn empty_playlist_and_errors_render_text() {
        let mut state = AppState::new("amtui Queue", Duration::from_secs(30));
        state.main = MainContent::Playlist(Playlist {
            name: "Empty".into(),
            tracks: vec![],
        });
        let nav = Navigator::new(default_layout());
        assert_eq!(render(&state, &nav, 40, 10)[3].trim(), "(empty playlist)");

        state.main = MainContent::Error {
            title: "Could not load Road Trip".into(),
            message: "x".repeat(200),
        };
        let rows = render(&state, &nav, 40, 10);
        assert_eq!(rows[0], "Could not load Road Trip");
        assert_eq!(rows[2].width(), 40);
    }
}
