//! Entities decoded from Music.app responses.
//!
//! Every value here is produced by [`crate::codec`] and treated as an
//! immutable snapshot of remote state at the time of the call.

use std::fmt;

/// Name of the playlist this client creates and owns as its "Up Next" queue.
pub const DEFAULT_QUEUE_NAME: &str = "amtui Queue";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    /// Persistent identifier. May be empty when the remote doesn't expose one.
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    /// Seconds.
    pub duration: f64,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            album: album.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// One entry of the queue listing, carrying its 1-based position in the
/// active playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub position: usize,
    pub track: Track,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueSnapshot {
    pub name: String,
    pub total_tracks: usize,
    pub tracks: Vec<QueueEntry>,
    pub current_track: Option<Track>,
    /// 1-based; 0 when nothing is playing or the position is unknown.
    pub current_position: usize,
}

impl QueueSnapshot {
    /// Entries strictly after the current position.
    pub fn upcoming(&self) -> impl Iterator<Item = &QueueEntry> {
        let current = self.current_position;
        self.tracks.iter().filter(move |e| e.position > current)
    }

    pub fn is_managed(&self, queue_name: &str) -> bool {
        self.name == queue_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

impl PlayerState {
    pub fn parse(word: &str) -> Self {
        let word = word.trim().to_ascii_lowercase();
        if word.starts_with("playing") || word.starts_with("fast") || word.starts_with("rewind") {
            PlayerState::Playing
        } else if word.starts_with("paused") {
            PlayerState::Paused
        } else {
            PlayerState::Stopped
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Stopped => "stopped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    One,
    All,
}

impl RepeatMode {
    /// off → all → one → off
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    pub fn as_script_word(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "off" => Some(RepeatMode::Off),
            "one" => Some(RepeatMode::One),
            "all" => Some(RepeatMode::All),
            _ => None,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_script_word())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackStatus {
    pub track: Option<Track>,
    pub state: PlayerState,
    pub position: f64,
    pub duration: f64,
    pub volume: u8,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

impl PlaybackStatus {
    /// 0.0..=1.0, or 0.0 when the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// `m:ss`, the format used everywhere a duration is shown.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
