//! Actions produced by the navigator, panels and overlays, applied by the App.

use crate::worker::Job;

/// Focusable list panels. Which ones exist and how they are arranged is
/// configured through [`crate::navigation::PanelSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Playlists,
    Tracks,
}

impl PanelId {
    pub fn label(self) -> &'static str {
        match self {
            PanelId::Playlists => "Playlists",
            PanelId::Tracks => "Tracks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    QueueInspector,
    ContextMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    PlayNext,
    AddToQueue,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::Play, MenuOption::PlayNext, MenuOption::AddToQueue];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Play => "Play",
            MenuOption::PlayNext => "Play Next",
            MenuOption::AddToQueue => "Add To Queue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // ── Search ───────────────────────────────────────────────────────────────
    BeginSearch,
    SubmitSearch,
    CancelSearch,

    /// Enter on a list entry.
    Activate { panel: PanelId, index: usize },

    // ── Modals ───────────────────────────────────────────────────────────────
    ModalOpened(Modal),
    CloseModal,
    RefreshQueue,
    /// Skip to a 1-based position of the active playlist.
    QueueJump(usize),
    MenuChoice(MenuOption),

    /// Fire-and-forget call to the player.
    Remote(Job),
}
