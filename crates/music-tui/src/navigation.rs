//! Navigation state machine.
//!
//! Owns focus, the active modal, per-panel cursors and the pending `Ctrl+W`
//! chord. It is the only writer of focus and modal state and decides where
//! each key goes; see [`Routed`].

use std::collections::HashMap;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Modal, PanelId};
use crate::components::{playlists, tracks};
use crate::viewport::visible_range;

/// Placement and behaviour of one list panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelSlot {
    pub id: PanelId,
    pub column: u8,
    pub row: u8,
    pub header_lines: usize,
    /// Panel whose content follows this panel's selection.
    pub dependent: Option<PanelId>,
    /// Move focus to `dependent` after Enter.
    pub focus_dependent_on_select: bool,
    /// `K` opens the context menu here.
    pub context_menu: bool,
}

/// Sidebar playlists on the left, track table on the right.
pub fn default_layout() -> Vec<PanelSlot> {
    vec![
        PanelSlot {
            id: PanelId::Playlists,
            column: 0,
            row: 0,
            header_lines: playlists::HEADER_LINES,
            dependent: Some(PanelId::Tracks),
            focus_dependent_on_select: true,
            context_menu: false,
        },
        PanelSlot {
            id: PanelId::Tracks,
            column: 1,
            row: 0,
            header_lines: tracks::HEADER_LINES,
            dependent: None,
            focus_dependent_on_select: false,
            context_menu: true,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Panel(PanelId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => Some(Direction::Left),
            KeyCode::Char('l') | KeyCode::Right => Some(Direction::Right),
            KeyCode::Char('k') | KeyCode::Up => Some(Direction::Up),
            KeyCode::Char('j') | KeyCode::Down => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub selected: usize,
    pub offset: usize,
}

/// Where a key ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// Consumed by the navigator.
    Handled(Vec<Action>),
    /// A modal is open and owns the key.
    Modal(Modal, KeyEvent),
    /// Text input for the search box.
    Search(KeyEvent),
    /// Not a navigation key; the App's global keymap gets a look.
    Unhandled(KeyEvent),
}

/// What the navigator needs to know about panel content.
pub trait NavContext {
    fn item_count(&self, panel: PanelId) -> usize;
    fn search_is_empty(&self) -> bool;
}

pub struct Navigator {
    /// Also the Tab order.
    slots: Vec<PanelSlot>,
    focus: Focus,
    /// Panel that search returns to.
    previous_panel: PanelId,
    modal: Option<Modal>,
    cursors: HashMap<PanelId, ListCursor>,
    /// Last entry activated with Enter, per panel.
    selection: HashMap<PanelId, usize>,
    /// Rows last rendered per panel.
    heights: HashMap<PanelId, usize>,
    chord_pending: bool,
}

impl Navigator {
    pub fn new(slots: Vec<PanelSlot>) -> Self {
        let first = slots.first().map(|s| s.id).unwrap_or(PanelId::Playlists);
        Self {
            slots,
            focus: Focus::Panel(first),
            previous_panel: first,
            modal: None,
            cursors: HashMap::new(),
            selection: HashMap::new(),
            heights: HashMap::new(),
            chord_pending: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Effective focus: nothing has focus while a modal is open.
    pub fn focus(&self) -> Option<Focus> {
        match self.modal {
            Some(_) => None,
            None => Some(self.focus),
        }
    }

    /// Focus as it will be once any modal closes.
    pub fn underlying_focus(&self) -> Focus {
        self.focus
    }

    pub fn is_focused(&self, panel: PanelId) -> bool {
        self.focus() == Some(Focus::Panel(panel))
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn chord_pending(&self) -> bool {
        self.chord_pending
    }

    pub fn cursor(&self, panel: PanelId) -> ListCursor {
        self.cursors.get(&panel).copied().unwrap_or_default()
    }

    pub fn selected(&self, panel: PanelId) -> usize {
        self.cursor(panel).selected
    }

    pub fn selection(&self, panel: PanelId) -> Option<usize> {
        self.selection.get(&panel).copied()
    }

    fn slot(&self, panel: PanelId) -> Option<&PanelSlot> {
        self.slots.iter().find(|s| s.id == panel)
    }

    pub fn header_lines(&self, panel: PanelId) -> usize {
        self.slot(panel).map(|s| s.header_lines).unwrap_or(0)
    }

    // ── Key routing ──────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &dyn NavContext) -> Routed {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Routed::Handled(vec![Action::Quit]);
        }

        if let Some(modal) = self.modal {
            self.chord_pending = false;
            return Routed::Modal(modal, key);
        }

        if self.focus == Focus::Search {
            self.chord_pending = false;
            return self.handle_search_key(key, ctx);
        }

        if self.chord_pending {
            self.chord_pending = false;
            if let Some(dir) = Direction::from_key(&key) {
                self.move_focus(dir);
                return Routed::Handled(Vec::new());
            }
            // Not a direction: the key is handled as if no chord was pending.
        }

        let Focus::Panel(panel) = self.focus else {
            return Routed::Unhandled(key);
        };

        match key.code {
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.chord_pending = true;
                Routed::Handled(Vec::new())
            }
            KeyCode::Char('/') => {
                self.previous_panel = panel;
                self.focus = Focus::Search;
                Routed::Handled(vec![Action::BeginSearch])
            }
            KeyCode::Tab => {
                self.cycle_focus(panel, 1);
                Routed::Handled(Vec::new())
            }
            KeyCode::BackTab => {
                self.cycle_focus(panel, -1);
                Routed::Handled(Vec::new())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(panel, -1, ctx.item_count(panel));
                Routed::Handled(Vec::new())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(panel, 1, ctx.item_count(panel));
                Routed::Handled(Vec::new())
            }
            KeyCode::Enter => Routed::Handled(self.activate(panel, ctx.item_count(panel))),
            KeyCode::Char('Q') => Routed::Handled(self.open_modal(Modal::QueueInspector)),
            KeyCode::Char('K') => {
                let allowed = self.slot(panel).is_some_and(|s| s.context_menu);
                if allowed && ctx.item_count(panel) > 0 {
                    Routed::Handled(self.open_modal(Modal::ContextMenu))
                } else {
                    Routed::Handled(Vec::new())
                }
            }
            KeyCode::Char('q') if key.modifiers.is_empty() => Routed::Handled(vec![Action::Quit]),
            _ => Routed::Unhandled(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, ctx: &dyn NavContext) -> Routed {
        match key.code {
            KeyCode::Enter => {
                self.return_from_search();
                if ctx.search_is_empty() {
                    Routed::Handled(vec![Action::CancelSearch])
                } else {
                    Routed::Handled(vec![Action::SubmitSearch])
                }
            }
            KeyCode::Esc => {
                self.return_from_search();
                Routed::Handled(vec![Action::CancelSearch])
            }
            _ => Routed::Search(key),
        }
    }

    fn return_from_search(&mut self) {
        self.focus = Focus::Panel(self.previous_panel);
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    pub fn open_modal(&mut self, modal: Modal) -> Vec<Action> {
        self.chord_pending = false;
        self.modal = Some(modal);
        vec![Action::ModalOpened(modal)]
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn focus_panel(&mut self, panel: PanelId) {
        if self.slot(panel).is_some() {
            self.focus = Focus::Panel(panel);
        }
    }

    /// New content for `panel` (e.g. search results): reset its cursor and
    /// focus it.
    pub fn show_content(&mut self, panel: PanelId) {
        self.cursors.insert(panel, ListCursor::default());
        self.focus_panel(panel);
    }

    /// Step through the slots in order, wrapping at either end.
    fn cycle_focus(&mut self, from: PanelId, step: isize) {
        let Some(at) = self.slots.iter().position(|s| s.id == from) else {
            return;
        };
        let len = self.slots.len() as isize;
        let next = (at as isize + step).rem_euclid(len) as usize;
        self.focus = Focus::Panel(self.slots[next].id);
    }

    fn move_focus(&mut self, dir: Direction) {
        let Focus::Panel(current) = self.focus else {
            return;
        };
        let Some(from) = self.slot(current).copied() else {
            return;
        };
        let (col, row) = (from.column as i16, from.row as i16);
        let candidates = self.slots.iter().filter(|s| {
            let (c, r) = (s.column as i16, s.row as i16);
            match dir {
                Direction::Left => c < col,
                Direction::Right => c > col,
                Direction::Up => c == col && r < row,
                Direction::Down => c == col && r > row,
            }
        });
        // Nearest column first, then nearest row.
        let target = candidates.min_by_key(|s| {
            let (c, r) = (s.column as i16, s.row as i16);
            ((c - col).abs(), (r - row).abs())
        });
        if let Some(target) = target.map(|s| s.id) {
            self.focus_panel(target);
        }
    }

    fn move_selection(&mut self, panel: PanelId, delta: i64, count: usize) {
        if count == 0 {
            return;
        }
        let cursor = self.cursors.entry(panel).or_default();
        let next = (cursor.selected as i64 + delta).clamp(0, count as i64 - 1);
        cursor.selected = next as usize;
        if let Some(&height) = self.heights.get(&panel) {
            let header = self.header_lines(panel);
            let cursor = self.cursors.entry(panel).or_default();
            cursor.offset = visible_range(count, height, header, cursor.selected, cursor.offset).offset;
        }
    }

    fn activate(&mut self, panel: PanelId, count: usize) -> Vec<Action> {
        if count == 0 {
            return Vec::new();
        }
        let index = self.selected(panel).min(count - 1);
        self.selection.insert(panel, index);
        if let Some(slot) = self.slot(panel).copied() {
            if let Some(dep) = slot.dependent {
                let cursor = self.cursors.entry(dep).or_default();
                cursor.selected = 0;
                cursor.offset = 0;
                if slot.focus_dependent_on_select {
                    self.focus_panel(dep);
                }
            }
        }
        vec![Action::Activate { panel, index }]
    }

    /// Record the rendered height of `panel` and bring its window in line
    /// with `count` items. Returns the offset to render with.
    pub fn sync_viewport(&mut self, panel: PanelId, height: usize, count: usize) -> ListCursor {
        self.heights.insert(panel, height);
        let header = self.header_lines(panel);
        let cursor = self.cursors.entry(panel).or_default();
        if count == 0 {
            *cursor = ListCursor::default();
        } else {
            cursor.selected = cursor.selected.min(count - 1);
            cursor.offset =
                visible_range(count, height, header, cursor.selected, cursor.offset).offset;
        }
        *cursor
    }
}
