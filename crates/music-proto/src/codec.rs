//! Wire codec for Music.app script responses.
//!
//! Responses are plain text with three delimiter levels:
//!
//! | level    | delimiter | joins                                   |
//! |----------|-----------|-----------------------------------------|
//! | field    | `~`       | fields of one track record              |
//! | record   | `\|\|`    | records of a list                       |
//! | section  | `\|`      | top-level sections of a composite reply |
//!
//! Sentinel prefixes (`ERROR:`, `Error:`, the not-running message) are
//! service failures and never reach the per-type decoders.

use tracing::debug;

use crate::error::{DecodeError, Error, Result};
use crate::model::{PlaybackStatus, PlayerState, QueueEntry, QueueSnapshot, RepeatMode, Track};

/// Bump when any response shape below changes incompatibly.
pub const WIRE_VERSION: u32 = 1;

pub const FIELD_SEP: char = '~';
pub const RECORD_SEP: &str = "||";
pub const SECTION_SEP: char = '|';

pub const TRACK_FIELDS: usize = 5;
pub const STATUS_FIELDS: usize = 10;
/// Header sections of a queue reply before the entry list.
pub const QUEUE_HEADER_FIELDS: usize = 7;

pub const NO_TRACKS: &str = "NO_TRACKS";
pub const NO_RESULTS: &str = "NO_RESULTS";
pub const NO_TRACK: &str = "NO_TRACK";
pub const NO_PLAYLIST: &str = "NO_PLAYLIST:";
pub const OK: &str = "OK";
pub const NOT_RUNNING: &str = "Music app is not running";

const ERROR_PREFIXES: [&str; 2] = ["ERROR:", "Error:"];

/// Longest search query sent to the player, in characters.
pub const MAX_QUERY_CHARS: usize = 100;

// ── Outgoing strings ──────────────────────────────────────────────────────────

/// Make `s` safe to place between double quotes in script text.
pub fn escape_script_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_script_string`], as the script interpreter reads it.
pub fn unescape_script_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Truncate then escape a free-text search query.
pub fn sanitize_query(query: &str) -> String {
    let truncated: String = query.trim().chars().take(MAX_QUERY_CHARS).collect();
    escape_script_string(&truncated)
}

// ── Record encoding ───────────────────────────────────────────────────────────

pub fn encode_track_record(track: &Track) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}",
        track.id,
        track.name,
        track.artist,
        track.album,
        track.duration,
        sep = FIELD_SEP
    )
}

pub fn join_records<I, S>(records: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = records.into_iter().map(|r| r.as_ref().to_string()).collect();
    parts.join(RECORD_SEP)
}

// ── Response classification ───────────────────────────────────────────────────

/// Strip whitespace and turn sentinel-prefixed failures into typed errors.
pub fn classify(raw: &str) -> Result<&str> {
    let body = raw.trim();
    for prefix in ERROR_PREFIXES {
        if let Some(rest) = body.strip_prefix(prefix) {
            return Err(Error::Service(rest.trim().to_string()));
        }
    }
    if body.starts_with(NOT_RUNNING) {
        return Err(Error::Service(NOT_RUNNING.to_string()));
    }
    if let Some(name) = body.strip_prefix(NO_PLAYLIST) {
        return Err(Error::NotFound(name.trim().to_string()));
    }
    Ok(body)
}

/// Types that can be read from a classified response body.
pub trait Decode: Sized {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError>;
}

pub fn decode<T: Decode>(raw: &str) -> Result<T> {
    let body = classify(raw)?;
    Ok(T::decode_body(body)?)
}

// ── Field parsing ─────────────────────────────────────────────────────────────

fn parse_f64(field: &'static str, value: &str) -> std::result::Result<f64, DecodeError> {
    let normalized = value.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DecodeError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_count(field: &'static str, value: &str) -> std::result::Result<usize, DecodeError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| DecodeError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Durations are cosmetic: anything unreadable is zero.
pub fn parse_duration(value: &str) -> f64 {
    parse_f64("duration", value).map(|d| d.max(0.0)).unwrap_or(0.0)
}

fn parse_bool(field: &'static str, value: &str) -> std::result::Result<bool, DecodeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DecodeError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn split_fields(record: &str) -> Vec<&str> {
    record.split(FIELD_SEP).collect()
}

// ── Records ───────────────────────────────────────────────────────────────────

/// `id~name~artist~album~duration`
pub fn decode_track_record(record: &str) -> std::result::Result<Track, DecodeError> {
    let fields = split_fields(record);
    if fields.len() != TRACK_FIELDS {
        return Err(DecodeError::MalformedRecord {
            expected: TRACK_FIELDS,
            found: fields.len(),
        });
    }
    if fields[1].trim().is_empty() {
        return Err(DecodeError::MissingField("name"));
    }
    Ok(Track {
        id: fields[0].trim().to_string(),
        name: fields[1].to_string(),
        artist: fields[2].to_string(),
        album: fields[3].to_string(),
        duration: parse_duration(fields[4]),
    })
}

/// `name~artist~album~duration~index`, every field required.
fn decode_queue_entry(record: &str) -> std::result::Result<QueueEntry, DecodeError> {
    let fields = split_fields(record);
    if fields.len() != TRACK_FIELDS {
        return Err(DecodeError::MalformedRecord {
            expected: TRACK_FIELDS,
            found: fields.len(),
        });
    }
    const NAMES: [&str; TRACK_FIELDS] = ["name", "artist", "album", "duration", "index"];
    if let Some(i) = fields.iter().position(|f| f.trim().is_empty()) {
        return Err(DecodeError::MissingField(NAMES[i]));
    }
    Ok(QueueEntry {
        position: parse_count("index", fields[4])?,
        track: Track {
            id: String::new(),
            name: fields[0].to_string(),
            artist: fields[1].to_string(),
            album: fields[2].to_string(),
            duration: parse_duration(fields[3]),
        },
    })
}

/// Decode every record of a list, skipping the malformed ones.
fn decode_records<T>(
    body: &str,
    decode_one: impl Fn(&str) -> std::result::Result<T, DecodeError>,
) -> Vec<T> {
    body.split(RECORD_SEP)
        .filter(|r| !r.trim().is_empty())
        .filter_map(|r| match decode_one(r) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("skipping record {:?}: {}", r, e);
                None
            }
        })
        .collect()
}

// ── Decode impls ──────────────────────────────────────────────────────────────

/// Acknowledgement of a command; the text is not inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack;

impl Decode for Ack {
    fn decode_body(_body: &str) -> std::result::Result<Self, DecodeError> {
        Ok(Ack)
    }
}

impl Decode for Vec<Track> {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        if body.is_empty() || body == NO_TRACKS || body == NO_RESULTS {
            return Ok(Vec::new());
        }
        Ok(decode_records(body, decode_track_record))
    }
}

impl Decode for Option<Track> {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        if body.is_empty() || body == NO_TRACK {
            return Ok(None);
        }
        decode_track_record(body).map(Some)
    }
}

/// User playlist names in library order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistNames(pub Vec<String>);

impl PlaylistNames {
    /// Drop the managed queue container from a listing.
    pub fn without(self, queue_name: &str) -> Vec<String> {
        self.0.into_iter().filter(|n| n != queue_name).collect()
    }
}

impl Decode for PlaylistNames {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        Ok(PlaylistNames(
            body.split(RECORD_SEP)
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }
}

impl Decode for QueueSnapshot {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        let sections: Vec<&str> = body.splitn(QUEUE_HEADER_FIELDS + 1, SECTION_SEP).collect();
        if sections.len() < QUEUE_HEADER_FIELDS {
            return Err(DecodeError::MalformedRecord {
                expected: QUEUE_HEADER_FIELDS,
                found: sections.len(),
            });
        }

        let total_tracks = parse_count("track count", sections[1])?;
        let mut current_position = parse_count("current position", sections[2])?;
        if current_position > total_tracks {
            current_position = 0;
        }

        let current_track = if current_position >= 1 && !sections[3].trim().is_empty() {
            Some(Track {
                id: String::new(),
                name: sections[3].to_string(),
                artist: sections[4].to_string(),
                album: sections[5].to_string(),
                duration: parse_duration(sections[6]),
            })
        } else {
            None
        };

        let tracks = match sections.get(QUEUE_HEADER_FIELDS) {
            Some(list) => decode_records(list, decode_queue_entry),
            None => Vec::new(),
        };

        Ok(QueueSnapshot {
            name: sections[0].to_string(),
            total_tracks,
            tracks,
            current_track,
            current_position,
        })
    }
}

impl Decode for PlaybackStatus {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        let f: Vec<&str> = body.split(SECTION_SEP).collect();
        if f.len() < STATUS_FIELDS {
            return Err(DecodeError::MalformedRecord {
                expected: STATUS_FIELDS,
                found: f.len(),
            });
        }

        let duration = parse_duration(f[5]);
        let track = if f[2].trim().is_empty() {
            None
        } else {
            Some(Track {
                id: f[1].trim().to_string(),
                name: f[2].to_string(),
                artist: f[3].to_string(),
                album: f[4].to_string(),
                duration,
            })
        };

        Ok(PlaybackStatus {
            track,
            state: PlayerState::parse(f[0]),
            position: parse_f64("position", f[6])?.max(0.0),
            duration,
            volume: u8::decode_body(f[7])?,
            shuffle: parse_bool("shuffle", f[8])?,
            repeat: RepeatMode::decode_body(f[9])?,
        })
    }
}

/// Volume, clamped to 0..=100.
impl Decode for u8 {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        let v = parse_f64("volume", body)?;
        Ok(v.round().clamp(0.0, 100.0) as u8)
    }
}

impl Decode for bool {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        parse_bool("flag", body)
    }
}

impl Decode for RepeatMode {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        RepeatMode::parse(body).ok_or(DecodeError::InvalidNumber {
            field: "repeat",
            value: body.to_string(),
        })
    }
}

impl Decode for PlayerState {
    fn decode_body(body: &str) -> std::result::Result<Self, DecodeError> {
        Ok(PlayerState::parse(body))
    }
}
