#![allow(dead_code)]

//! In-memory stand-in for Music.app that answers the scripts the client
//! sends, keyed on the statements each request encodes.

use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use music_proto::codec::{
    encode_track_record, join_records, unescape_script_string, NOT_RUNNING, NO_PLAYLIST, NO_RESULTS,
    NO_TRACKS,
};
use music_proto::script::ScriptContext;
use music_proto::{Automation, InvocationError, PlaybackClient, PlayerState, RepeatMode, Track};

pub const QUEUE: &str = "amtui Queue";

#[derive(Debug, Clone)]
pub struct FakeState {
    pub running: bool,
    pub playlists: Vec<(String, Vec<Track>)>,
    pub queue: Option<Vec<Track>>,
    /// Active playlist name and 1-based position of the playing track.
    pub current: Option<(String, usize)>,
    pub state: PlayerState,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub volume: u8,
    pub position: f64,
    /// Reply returned verbatim for the next call, whatever it is.
    pub canned: Option<String>,
    pub invocation_failure: bool,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            running: true,
            playlists: Vec::new(),
            queue: None,
            current: None,
            state: PlayerState::Stopped,
            shuffle: false,
            repeat: RepeatMode::Off,
            volume: 50,
            position: 0.0,
            canned: None,
            invocation_failure: false,
        }
    }
}

#[derive(Default)]
pub struct FakeMusic {
    pub state: Mutex<FakeState>,
    pub scripts: Mutex<Vec<String>>,
}

pub fn track(n: usize) -> Track {
    Track::new(
        format!("ID{n}"),
        format!("track{n}"),
        format!("Artist {n}"),
        "Album",
        120.0 + n as f64,
    )
}

pub fn road_trip() -> (String, Vec<Track>) {
    ("Road Trip".to_string(), (1..=5).map(track).collect())
}

impl FakeMusic {
    pub fn with_playlists(playlists: Vec<(String, Vec<Track>)>) -> Arc<Self> {
        let fake = FakeMusic::default();
        fake.lock().playlists = playlists;
        Arc::new(fake)
    }

    pub fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn client(self: &Arc<Self>) -> PlaybackClient {
        PlaybackClient::new(self.clone(), ScriptContext::default())
    }

    pub fn queue_names(&self) -> Vec<String> {
        self.lock()
            .queue
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.name)
            .collect()
    }

    pub fn script_count(&self) -> usize {
        self.scripts.lock().unwrap().len()
    }

    fn playlist_tracks(state: &FakeState, name: &str) -> Option<Vec<Track>> {
        if name == QUEUE {
            return state.queue.clone();
        }
        state
            .playlists
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.clone())
    }

    fn respond(&self, script: &str) -> String {
        let mut st = self.lock();
        if let Some(reply) = st.canned.take() {
            return reply;
        }
        if !st.running {
            return NOT_RUNNING.to_string();
        }

        if script.contains("delete every track of q") {
            let source = literal_after(script, "exists user playlist ").unwrap_or_default();
            let Some(tracks) = Self::playlist_tracks(&st, &source) else {
                return format!("{NO_PLAYLIST}{source}");
            };
            let order = list_after(script, "repeat with i in {");
            st.queue = Some(order.iter().map(|&i| tracks[i - 1].clone()).collect());
            st.shuffle = false;
            return "OK".into();
        }

        if script.contains("delete track 1 of cp") {
            let Some((name, pos)) = st.current.clone() else {
                return "OK".into();
            };
            if name != QUEUE || pos <= 1 {
                return "OK".into();
            }
            if let Some(q) = st.queue.as_mut() {
                q.drain(..pos - 1);
            }
            st.current = Some((name, 1));
            return format!("OK:{}", pos - 1);
        }

        if script.contains("duplicate target to q") {
            let name = literal_after(script, "whose name is ").unwrap_or_default();
            let artist = literal_after(script, "if artist of t is ");
            let all: Vec<Track> = st.playlists.iter().flat_map(|(_, t)| t.clone()).collect();
            let matches: Vec<&Track> = all.iter().filter(|t| t.name == name).collect();
            let Some(first) = matches.first() else {
                return format!("ERROR: Track not found in your library: {name}");
            };
            let target = artist
                .and_then(|a| matches.iter().find(|t| t.artist == a))
                .unwrap_or(first);
            let target = (*target).clone();
            let queue = st.queue.get_or_insert_with(Vec::new);
            queue.push(target);
            if let Some(p) = number_after(script, "repeat (n - ") {
                let item = queue.pop().unwrap();
                let at = (p - 1).min(queue.len());
                queue.insert(at, item);
            }
            return "OK".into();
        }

        if script.contains("out of range (1-") {
            let p = number_after(script, "play track ").unwrap_or(0);
            let Some((name, _)) = st.current.clone() else {
                return "ERROR: no current playlist".into();
            };
            let n = Self::playlist_tracks(&st, &name).map(|t| t.len()).unwrap_or(0);
            if p < 1 || p > n {
                return format!("ERROR: Position {p} out of range (1-{n})");
            }
            st.current = Some((name, p));
            st.state = PlayerState::Playing;
            return "OK".into();
        }

        if script.contains("set qn to name of cp") {
            let Some((name, pos)) = st.current.clone() else {
                return "ERROR: Can't get current playlist".into();
            };
            let tracks = Self::playlist_tracks(&st, &name).unwrap_or_default();
            let cur = tracks.get(pos.wrapping_sub(1)).cloned().unwrap_or_default();
            let entries = tracks.iter().enumerate().map(|(i, t)| {
                format!("{}~{}~{}~{}~{}", t.name, t.artist, t.album, t.duration, i + 1)
            });
            return format!(
                "{}|{}|{}|{}|{}|{}|{}|{}",
                name,
                tracks.len(),
                pos,
                cur.name,
                cur.artist,
                cur.album,
                cur.duration,
                join_records(entries)
            );
        }

        if script.contains("play user playlist") {
            st.current = Some((QUEUE.to_string(), 1));
            st.state = PlayerState::Playing;
            return "OK".into();
        }

        if script.contains("whose name contains") {
            let q = literal_after(script, "whose name contains ").unwrap_or_default();
            let hits: Vec<String> = st
                .playlists
                .iter()
                .flat_map(|(_, t)| t.iter())
                .filter(|t| t.name.contains(&q))
                .map(encode_track_record)
                .collect();
            return if hits.is_empty() {
                NO_RESULTS.to_string()
            } else {
                join_records(hits)
            };
        }

        if script.contains("whose special kind is none") {
            let mut names: Vec<String> = st.playlists.iter().map(|(n, _)| n.clone()).collect();
            if st.queue.is_some() {
                names.push(QUEUE.to_string());
            }
            return join_records(names);
        }

        if script.contains("set tl to every track of user playlist") {
            let name = literal_after(script, "exists user playlist ").unwrap_or_default();
            return match Self::playlist_tracks(&st, &name) {
                None => format!("{NO_PLAYLIST}{name}"),
                Some(t) if t.is_empty() => NO_TRACKS.to_string(),
                Some(t) => join_records(t.iter().map(encode_track_record)),
            };
        }

        if script.contains("set st to player state as string") {
            let track = st.current.clone().and_then(|(name, pos)| {
                Self::playlist_tracks(&st, &name).and_then(|t| t.get(pos - 1).cloned())
            });
            return match track {
                Some(t) if st.state != PlayerState::Stopped => format!(
                    "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
                    st.state.label(),
                    t.id,
                    t.name,
                    t.artist,
                    t.album,
                    t.duration,
                    st.position,
                    st.volume,
                    st.shuffle,
                    st.repeat
                ),
                _ => format!("stopped||||||0|{}|{}|{}", st.volume, st.shuffle, st.repeat),
            };
        }

        if script.contains("return player state as string") {
            return st.state.label().to_string();
        }
        if script.contains("return shuffle enabled as string") {
            return st.shuffle.to_string();
        }
        if script.contains("set shuffle enabled to ") {
            st.shuffle = script.contains("set shuffle enabled to true");
            return "OK".into();
        }
        if script.contains("return song repeat as string") {
            return st.repeat.to_string();
        }
        if let Some(word) = word_after(script, "set song repeat to ") {
            st.repeat = RepeatMode::parse(&word).unwrap_or_default();
            return "OK".into();
        }
        if script.contains("return sound volume as string") {
            return st.volume.to_string();
        }
        if let Some(v) = number_after(script, "set sound volume to ") {
            st.volume = v as u8;
            return "OK".into();
        }
        if script.contains("\npause\n") {
            st.state = PlayerState::Paused;
            return "OK".into();
        }
        if script.contains("\nplay\n") || script.contains("play (first track") {
            st.state = PlayerState::Playing;
            return "OK".into();
        }
        "OK".into()
    }
}

impl Automation for FakeMusic {
    fn run<'a>(&'a self, script: &'a str) -> BoxFuture<'a, Result<String, InvocationError>> {
        async move {
            self.scripts.lock().unwrap().push(script.to_string());
            if self.lock().invocation_failure {
                return Err(InvocationError::Failed {
                    status: 1,
                    stderr: "execution error".into(),
                });
            }
            Ok(self.respond(script))
        }
        .boxed()
    }
}

/// The quoted literal that follows `marker`, unescaped.
pub fn literal_after(script: &str, marker: &str) -> Option<String> {
    let start = script.find(marker)? + marker.len();
    let rest = script[start..].strip_prefix('"')?;
    let mut raw = String::new();
    let mut escaped = false;
    for c in rest.chars() {
        if escaped {
            raw.push('\\');
            raw.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(unescape_script_string(&raw));
        } else {
            raw.push(c);
        }
    }
    None
}

fn number_after(script: &str, marker: &str) -> Option<usize> {
    let start = script.find(marker)? + marker.len();
    let digits: String = script[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn word_after(script: &str, marker: &str) -> Option<String> {
    let start = script.find(marker)? + marker.len();
    Some(
        script[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect(),
    )
}

fn list_after(script: &str, marker: &str) -> Vec<usize> {
    let Some(start) = script.find(marker).map(|i| i + marker.len()) else {
        return Vec::new();
    };
    let end = script[start..].find('}').map(|e| start + e).unwrap_or(start);
    script[start..end]
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}
