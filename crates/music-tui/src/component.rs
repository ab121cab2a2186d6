//! Component trait: the interface every pane implements.
//!
//! Panes are pure renderers: they read `AppState` and the navigator through a
//! [`RenderCtx`] and return lines. Cursor state lives in the navigator, so a
//! pane never mutates anything while drawing.

use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use crate::app_state::AppState;
use crate::navigation::Navigator;
use crate::theme::Theme;
use crate::widgets::pane_chrome::pane_chrome_with_badge;

pub struct RenderCtx<'a> {
    pub state: &'a AppState,
    pub nav: &'a Navigator,
    pub theme: &'a Theme,
}

pub trait Component {
    fn title(&self, ctx: &RenderCtx) -> String;

    fn focused(&self, _ctx: &RenderCtx) -> bool {
        false
    }

    /// Shown at the top right of the border.
    fn badge(&self, _ctx: &RenderCtx) -> Option<String> {
        None
    }

    /// Body lines for an inner area of `width`×`height` cells.
    fn lines(&self, ctx: &RenderCtx, width: usize, height: usize) -> Vec<Line<'static>>;

    fn draw(&self, frame: &mut Frame, area: Rect, ctx: &RenderCtx) {
        let block = pane_chrome_with_badge(
            &self.title(ctx),
            self.badge(ctx),
            self.focused(ctx),
            ctx.theme,
        );
        let inner = block.inner(area);
        let lines = self.lines(ctx, inner.width as usize, inner.height as usize);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
