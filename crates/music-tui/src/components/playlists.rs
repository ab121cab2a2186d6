//! Playlists sidebar.

use ratatui::text::{Line, Span};

use crate::action::PanelId;
use crate::app_state::Loadable;
use crate::component::{Component, RenderCtx};
use crate::text::{fit, truncate};
use crate::viewport::{indicator_text, visible_range};

pub const HEADER_LINES: usize = 2;

pub struct PlaylistsPanel;

impl Component for PlaylistsPanel {
    fn title(&self, _ctx: &RenderCtx) -> String {
        PanelId::Playlists.label().to_string()
    }

    fn focused(&self, ctx: &RenderCtx) -> bool {
        ctx.nav.is_focused(PanelId::Playlists)
    }

    fn lines(&self, ctx: &RenderCtx, width: usize, height: usize) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let names = match &ctx.state.playlists {
            Loadable::Loading => {
                return vec![Line::from(Span::styled("  Loading playlists…", theme.muted()))]
            }
            Loadable::Failed(e) => {
                return vec![
                    Line::from(Span::styled("  Could not load playlists", theme.error())),
                    Line::from(Span::styled(truncate(&format!("  {}", e), width), theme.muted())),
                ]
            }
            Loadable::Ready(names) => names,
        };

        let mut lines = vec![
            Line::from(Span::styled(
                truncate(&format!(" {} playlists", names.len()), width),
                theme.secondary(),
            )),
            Line::from(Span::styled("─".repeat(width), theme.separator())),
        ];
        if names.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", theme.muted())));
            return lines;
        }

        let cursor = ctx.nav.cursor(PanelId::Playlists);
        let range = visible_range(names.len(), height, HEADER_LINES, cursor.selected, cursor.offset);
        let focused = self.focused(ctx);
        let chosen = ctx.nav.selection(PanelId::Playlists);
        for (i, name) in names.iter().enumerate().take(range.end).skip(range.start) {
            let marker = if chosen == Some(i) { "♪ " } else { "  " };
            let text = format!("{}{}", marker, fit(name, width.saturating_sub(2)));
            let style = if i == cursor.selected {
                theme.selected(focused)
            } else {
                theme.text()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
        if range.indicator {
            lines.push(Line::from(Span::styled(
                format!(" {}", indicator_text(cursor.selected, names.len())),
                theme.muted(),
            )));
        }
        lines
    }
}
