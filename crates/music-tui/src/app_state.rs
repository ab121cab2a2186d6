//! AppState: data fetched from the player, read by every renderer.
//!
//! Only the event loop writes here, and only in response to `AppMessage`s.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use music_proto::{PlaybackStatus, Playlist, QueueSnapshot, Track};

use crate::action::PanelId;
use crate::navigation::NavContext;
use crate::widgets::search_input::SearchInput;

/// A value fetched in the background.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(v) => Loadable::Ready(v),
            Err(e) => Loadable::Failed(e),
        }
    }
}

/// What the main panel is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum MainContent {
    Welcome,
    Loading(String),
    Playlist(Playlist),
    Searching(String),
    SearchResults { query: String, tracks: Vec<Track> },
    Error { title: String, message: String },
}

impl MainContent {
    pub fn tracks(&self) -> &[Track] {
        match self {
            MainContent::Playlist(p) => &p.tracks,
            MainContent::SearchResults { tracks, .. } => tracks,
            _ => &[],
        }
    }
}

/// Fetched playlists by name, each valid for `ttl`.
#[derive(Debug)]
pub struct PlaylistCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, Playlist)>,
}

impl PlaylistCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str, now: Instant) -> Option<&Playlist> {
        self.entries
            .get(name)
            .filter(|(at, _)| now.saturating_duration_since(*at) < self.ttl)
            .map(|(_, p)| p)
    }

    pub fn insert(&mut self, playlist: Playlist, now: Instant) {
        self.entries.insert(playlist.name.clone(), (now, playlist));
    }
}

pub struct AppState {
    pub playlists: Loadable<Vec<String>>,
    pub main: MainContent,
    pub status: Option<PlaybackStatus>,
    pub status_error: Option<String>,
    pub queue: Loadable<QueueSnapshot>,
    pub cache: PlaylistCache,
    pub search: SearchInput,
    pub queue_name: String,
}

impl AppState {
    pub fn new(queue_name: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            playlists: Loadable::Loading,
            main: MainContent::Welcome,
            status: None,
            status_error: None,
            queue: Loadable::Loading,
            cache: PlaylistCache::new(cache_ttl),
            search: SearchInput::new("Search library..."),
            queue_name: queue_name.into(),
        }
    }

    pub fn playlist_names(&self) -> &[String] {
        self.playlists.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn shuffle(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.shuffle)
    }

    pub fn current_track_id(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|s| s.track.as_ref())
            .map(|t| t.id.as_str())
    }
}

impl NavContext for AppState {
    fn item_count(&self, panel: PanelId) -> usize {
        match panel {
            PanelId::Playlists => self.playlist_names().len(),
            PanelId::Tracks => self.main.tracks().len(),
        }
    }

    fn search_is_empty(&self) -> bool {
        self.search.text().trim().is_empty()
    }
}
