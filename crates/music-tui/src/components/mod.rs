pub mod context_menu;
pub mod now_playing;
pub mod playlists;
pub mod queue_inspector;
pub mod tracks;
