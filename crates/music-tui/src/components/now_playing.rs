//! Playback bar: current track, progress and player settings.

use music_proto::{PlaybackStatus, PlayerState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::component::{Component, RenderCtx};
use crate::text::truncate;
use crate::widgets::progress_bar::draw_progress;

pub struct NowPlaying;

fn state_icon(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Playing => "▶",
        PlayerState::Paused => "⏸",
        PlayerState::Stopped => "■",
    }
}

fn settings_line(status: &PlaybackStatus) -> String {
    format!(
        "Vol {}%  Shuffle {}  Repeat {}",
        status.volume,
        if status.shuffle { "on" } else { "off" },
        status.repeat
    )
}

impl Component for NowPlaying {
    fn title(&self, _ctx: &RenderCtx) -> String {
        "Now Playing".to_string()
    }

    /// Row 1 is left blank for the progress bar.
    fn lines(&self, ctx: &RenderCtx, width: usize, _height: usize) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let Some(status) = &ctx.state.status else {
            let text = match &ctx.state.status_error {
                Some(e) => Span::styled(truncate(&format!(" {}", e), width), theme.error()),
                None => Span::styled(" Waiting for Music…", theme.muted()),
            };
            return vec![Line::from(text)];
        };

        let colour = match status.state {
            PlayerState::Playing => theme.playing,
            PlayerState::Paused => theme.paused,
            PlayerState::Stopped => theme.muted,
        };
        let mut top = vec![Span::styled(
            format!(" {} ", state_icon(status.state)),
            Style::default().fg(colour).add_modifier(Modifier::BOLD),
        )];
        match &status.track {
            Some(t) => {
                let title = format!("{} - {}", t.name, t.artist);
                let room = width.saturating_sub(3);
                top.push(Span::styled(truncate(&title, room), theme.heading()));
                let used = title.chars().count() + 3;
                if !t.album.is_empty() && used + 4 < width {
                    top.push(Span::styled(
                        truncate(&format!("  ({})", t.album), width - used),
                        theme.secondary(),
                    ));
                }
            }
            None => top.push(Span::styled("Nothing playing", theme.muted())),
        }

        let mut bottom = vec![Span::styled(
            format!(" {}", settings_line(status)),
            theme.secondary(),
        )];
        if let Some(e) = &ctx.state.status_error {
            bottom.push(Span::styled(
                truncate(&format!("  {}", e), width.saturating_sub(30)),
                theme.error(),
            ));
        }

        vec![Line::from(top), Line::from(""), Line::from(bottom)]
    }

    fn draw(&self, frame: &mut Frame, area: Rect, ctx: &RenderCtx) {
        let lines = self.lines(ctx, area.width as usize, area.height as usize);
        frame.render_widget(Paragraph::new(lines), area);
        if let (Some(status), true) = (&ctx.state.status, area.height >= 2) {
            let bar = Rect {
                x: area.x + 1,
                y: area.y + 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            draw_progress(frame, bar, status.position, status.duration, ctx.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use music_proto::{RepeatMode, Track};

    use super::*;
    use crate::app_state::AppState;
    use crate::navigation::{default_layout, Navigator};
    use crate::theme::Theme;

    fn render(state: &AppState) -> Vec<String> {
        let nav = Navigator::new(default_layout());
        let theme = Theme::default();
        let ctx = RenderCtx { state, nav: &nav, theme: &theme };
        NowPlaying
            .lines(&ctx, 80, 3)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn shows_track_and_settings() {
        let mut state = AppState::new("amtui Queue", Duration::from_secs(30));
        state.status = Some(PlaybackStatus {
            track: Some(Track::new("1", "Midnight City", "M83", "Hurry Up", 243.0)),
            state: PlayerState::Playing,
            position: 61.0,
            duration: 243.0,
            volume: 70,
            shuffle: true,
            repeat: RepeatMode::All,
        });

        let rows = render(&state);

        assert_eq!(rows[0], " ▶ Midnight City - M83  (Hurry Up)");
        assert_eq!(rows[2], " Vol 70%  Shuffle on  Repeat all");
    }

    #[test]
    fn poll_error_without_status() {
        let mut state = AppState::new("amtui Queue", Duration::from_secs(30));
        state.status_error = Some("Music app is not running".into());
        assert_eq!(render(&state), vec![" Music app is not running".to_string()]);
    }
}
