//! Request encoding: the only place script text is produced.
//!
//! Every script runs inside the same envelope: it bails out with the
//! not-running sentinel if the player is closed and turns any script
//! failure into an `ERROR:` reply, so the codec sees a single convention.

use crate::codec::{escape_script_string, sanitize_query, NOT_RUNNING, NO_PLAYLIST, NO_RESULTS};
use crate::codec::{NO_TRACK, NO_TRACKS, OK};
use crate::model::RepeatMode;

/// Names interpolated into every script.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    pub application: String,
    pub queue_name: String,
}

impl Default for ScriptContext {
    fn default() -> Self {
        Self {
            application: "Music".to_string(),
            queue_name: crate::model::DEFAULT_QUEUE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Play,
    Pause,
    PlayPause,
    Stop,
    NextTrack,
    PreviousTrack,
    Seek(f64),
    SetVolume(u8),
    GetVolume,
    SetShuffle(bool),
    GetShuffle,
    SetRepeat(RepeatMode),
    GetRepeat,
    GetPlayerState,
    Search { query: String, limit: usize },
    CurrentTrack,
    PlaybackStatus,
    PlaylistNames,
    Playlist { name: String },
    QueueSnapshot,
    SkipToQueuePosition(usize),
    /// Recreate the managed queue from `source`, duplicating tracks in
    /// `order` (1-based positions in the source playlist).
    RebuildQueue { source: String, order: Vec<usize> },
    CleanupQueue,
    /// Append a library track to the managed queue, then move it to
    /// `position` when given.
    AddToQueue {
        name: String,
        artist: Option<String>,
        position: Option<usize>,
    },
    PlayQueue,
    PlayTrack { id: String },
}

impl Request {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Play => "play",
            Request::Pause => "pause",
            Request::PlayPause => "playpause",
            Request::Stop => "stop",
            Request::NextTrack => "next",
            Request::PreviousTrack => "previous",
            Request::Seek(_) => "seek",
            Request::SetVolume(_) => "set-volume",
            Request::GetVolume => "get-volume",
            Request::SetShuffle(_) => "set-shuffle",
            Request::GetShuffle => "get-shuffle",
            Request::SetRepeat(_) => "set-repeat",
            Request::GetRepeat => "get-repeat",
            Request::GetPlayerState => "player-state",
            Request::Search { .. } => "search",
            Request::CurrentTrack => "current-track",
            Request::PlaybackStatus => "status",
            Request::PlaylistNames => "playlist-names",
            Request::Playlist { .. } => "playlist",
            Request::QueueSnapshot => "queue",
            Request::SkipToQueuePosition(_) => "skip-to",
            Request::RebuildQueue { .. } => "rebuild-queue",
            Request::CleanupQueue => "cleanup-queue",
            Request::AddToQueue { .. } => "add-to-queue",
            Request::PlayQueue => "play-queue",
            Request::PlayTrack { .. } => "play-track",
        }
    }
}

// ── Script fragments ──────────────────────────────────────────────────────────

fn quoted(s: &str) -> String {
    format!("\"{}\"", escape_script_string(s))
}

/// `id~name~artist~album~duration` for the track variable `var`.
fn track_record_expr(var: &str) -> String {
    format!(
        "(persistent ID of {v}) & \"~\" & (name of {v}) & \"~\" & (artist of {v}) \
         & \"~\" & (album of {v}) & \"~\" & (duration of {v})",
        v = var
    )
}

/// Join the list variable `list` with `||` into `out`.
fn join_records_stmt(list: &str, out: &str) -> String {
    format!(
        "set AppleScript's text item delimiters to \"||\"\n\
         set {out} to {list} as text\n\
         set AppleScript's text item delimiters to \"\""
    )
}

fn open_queue_stmt(queue: &str) -> String {
    format!(
        "if exists user playlist {q} then\n\
         set q to user playlist {q}\n\
         else\n\
         set q to make new user playlist with properties {{name:{q}}}\n\
         end if",
        q = queue
    )
}

fn envelope(ctx: &ScriptContext, body: &str) -> String {
    let app = quoted(&ctx.application);
    format!(
        "if application {app} is not running then return \"{NOT_RUNNING}\"\n\
         tell application {app}\n\
         try\n\
         {body}\n\
         on error errMsg\n\
         return \"ERROR: \" & errMsg\n\
         end try\n\
         end tell"
    )
}

// ── Encoding ──────────────────────────────────────────────────────────────────

pub fn encode_script(request: &Request, ctx: &ScriptContext) -> String {
    envelope(ctx, &encode_body(request, ctx))
}

fn encode_body(request: &Request, ctx: &ScriptContext) -> String {
    let queue = quoted(&ctx.queue_name);
    match request {
        Request::Play => format!("play\nreturn \"{OK}\""),
        Request::Pause => format!("pause\nreturn \"{OK}\""),
        Request::PlayPause => format!("playpause\nreturn \"{OK}\""),
        Request::Stop => format!("stop\nreturn \"{OK}\""),
        Request::NextTrack => format!("next track\nreturn \"{OK}\""),
        Request::PreviousTrack => format!("previous track\nreturn \"{OK}\""),
        Request::Seek(secs) => {
            format!("set player position to {:.2}\nreturn \"{OK}\"", secs.max(0.0))
        }
        Request::SetVolume(v) => {
            format!("set sound volume to {}\nreturn \"{OK}\"", (*v).min(100))
        }
        Request::GetVolume => "return sound volume as string".to_string(),
        Request::SetShuffle(on) => format!("set shuffle enabled to {on}\nreturn \"{OK}\""),
        Request::GetShuffle => "return shuffle enabled as string".to_string(),
        Request::SetRepeat(mode) => {
            format!("set song repeat to {}\nreturn \"{OK}\"", mode.as_script_word())
        }
        Request::GetRepeat => "return song repeat as string".to_string(),
        Request::GetPlayerState => "return player state as string".to_string(),
        Request::Search { query, limit } => format!(
            "set found to (every track of library playlist 1 whose name contains \"{q}\")\n\
             if (count of found) is 0 then return \"{NO_RESULTS}\"\n\
             set out to {{}}\n\
             repeat with t in found\n\
             if (count of out) ≥ {limit} then exit repeat\n\
             set end of out to {rec}\n\
             end repeat\n\
             {join}\n\
             return s",
            q = sanitize_query(query),
            limit = (*limit).min(crate::client::SEARCH_LIMIT),
            rec = track_record_expr("t"),
            join = join_records_stmt("out", "s"),
        ),
        Request::CurrentTrack => format!(
            "if player state is stopped then return \"{NO_TRACK}\"\n\
             set t to current track\n\
             return {}",
            track_record_expr("t")
        ),
        Request::PlaybackStatus => "set st to player state as string\n\
             set vol to sound volume as string\n\
             set sh to shuffle enabled as string\n\
             set rp to song repeat as string\n\
             if player state is stopped then return st & \"||||||0|\" & vol & \"|\" & sh & \"|\" & rp\n\
             set t to current track\n\
             return st & \"|\" & (persistent ID of t) & \"|\" & (name of t) & \"|\" & (artist of t) \
             & \"|\" & (album of t) & \"|\" & (duration of t) & \"|\" & (player position) \
             & \"|\" & vol & \"|\" & sh & \"|\" & rp"
            .to_string(),
        Request::PlaylistNames => format!(
            "set names to name of every user playlist whose special kind is none\n\
             {}\n\
             return s",
            join_records_stmt("names", "s")
        ),
        Request::Playlist { name } => format!(
            "if not (exists user playlist {p}) then return \"{NO_PLAYLIST}{raw}\"\n\
             set tl to every track of user playlist {p}\n\
             if (count of tl) is 0 then return \"{NO_TRACKS}\"\n\
             set out to {{}}\n\
             repeat with t in tl\n\
             set end of out to {rec}\n\
             end repeat\n\
             {join}\n\
             return s",
            p = quoted(name),
            raw = escape_script_string(name),
            rec = track_record_expr("t"),
            join = join_records_stmt("out", "s"),
        ),
        Request::QueueSnapshot => format!(
            "set cp to current playlist\n\
             set qn to name of cp\n\
             set tl to every track of cp\n\
             set n to count of tl\n\
             set pos to 0\n\
             set cn to \"\"\n\
             set ca to \"\"\n\
             set cal to \"\"\n\
             set cd to \"\"\n\
             if player state is not stopped then\n\
             set ct to current track\n\
             set cn to name of ct\n\
             set ca to artist of ct\n\
             set cal to album of ct\n\
             set cd to (duration of ct) as string\n\
             set cid to persistent ID of ct\n\
             repeat with i from 1 to n\n\
             if persistent ID of (item i of tl) is cid then\n\
             set pos to i\n\
             exit repeat\n\
             end if\n\
             end repeat\n\
             end if\n\
             set out to {{}}\n\
             repeat with i from 1 to n\n\
             set t to item i of tl\n\
             set end of out to (name of t) & \"~\" & (artist of t) & \"~\" & (album of t) \
             & \"~\" & (duration of t) & \"~\" & i\n\
             end repeat\n\
             {join}\n\
             return qn & \"|\" & n & \"|\" & pos & \"|\" & cn & \"|\" & ca & \"|\" & cal \
             & \"|\" & cd & \"|\" & s",
            join = join_records_stmt("out", "s"),
        ),
        Request::SkipToQueuePosition(p) => format!(
            "set cp to current playlist\n\
             set n to count of tracks of cp\n\
             if {p} < 1 or {p} > n then return \"ERROR: Position {p} out of range (1-\" & n & \")\"\n\
             play track {p} of cp\n\
             return \"{OK}\""
        ),
        Request::RebuildQueue { source, order } => {
            let indices: Vec<String> = order.iter().map(|i| i.to_string()).collect();
            format!(
                "if not (exists user playlist {src}) then return \"{NO_PLAYLIST}{raw}\"\n\
                 set srcTracks to every track of user playlist {src}\n\
                 {open}\n\
                 delete every track of q\n\
                 repeat with i in {{{list}}}\n\
                 duplicate (item (contents of i) of srcTracks) to q\n\
                 end repeat\n\
                 set shuffle enabled to false\n\
                 return \"{OK}\"",
                src = quoted(source),
                raw = escape_script_string(source),
                open = open_queue_stmt(&queue),
                list = indices.join(", "),
            )
        }
        Request::CleanupQueue => format!(
            "try\n\
             if player state is stopped then return \"{OK}\"\n\
             set cp to current playlist\n\
             if name of cp is not {queue} then return \"{OK}\"\n\
             set cid to persistent ID of current track\n\
             on error\n\
             return \"{OK}\"\n\
             end try\n\
             set tl to every track of cp\n\
             set pos to 0\n\
             repeat with i from 1 to count of tl\n\
             if persistent ID of (item i of tl) is cid then\n\
             set pos to i\n\
             exit repeat\n\
             end if\n\
             end repeat\n\
             if pos ≤ 1 then return \"{OK}\"\n\
             repeat (pos - 1) times\n\
             delete track 1 of cp\n\
             end repeat\n\
             return \"{OK}:\" & (pos - 1)"
        ),
        Request::AddToQueue {
            name,
            artist,
            position,
        } => {
            let prefer_artist = match artist.as_deref().filter(|a| !a.is_empty()) {
                Some(a) => format!(
                    "repeat with t in matches\n\
                     if artist of t is {} then\n\
                     set target to contents of t\n\
                     exit repeat\n\
                     end if\n\
                     end repeat\n",
                    quoted(a)
                ),
                None => String::new(),
            };
            let reposition = match position {
                Some(p) => format!(
                    "set n to count of tracks of q\n\
                     if {p} < n then\n\
                     repeat (n - {p}) times\n\
                     duplicate track {p} of q to q\n\
                     delete track {p} of q\n\
                     end repeat\n\
                     end if\n"
                ),
                None => String::new(),
            };
            format!(
                "set matches to (every track of library playlist 1 whose name is {n})\n\
                 if (count of matches) is 0 then return \"ERROR: Track not found in your library: {raw}\"\n\
                 set target to item 1 of matches\n\
                 {prefer_artist}\
                 {open}\n\
                 duplicate target to q\n\
                 {reposition}\
                 return \"{OK}\"",
                n = quoted(name),
                raw = escape_script_string(name),
                open = open_queue_stmt(&queue),
            )
        }
        Request::PlayQueue => format!("play user playlist {queue}\nreturn \"{OK}\""),
        Request::PlayTrack { id } => format!(
            "play (first track of library playlist 1 whose persistent ID is {})\n\
             return \"{OK}\"",
            quoted(id)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ScriptContext {
        ScriptContext::default()
    }

    #[test]
    fn envelope_checks_app_and_traps_errors() {
        let s = encode_script(&Request::Play, &ctx());
        assert!(s.starts_with("if application \"Music\" is not running"));
        assert!(s.contains("tell application \"Music\""));
        assert!(s.contains("return \"ERROR: \" & errMsg"));
        assert!(s.contains("\nplay\n"));
    }

    #[test]
    fn user_strings_are_escaped() {
        let s = encode_script(
            &Request::Playlist {
                name: "Mom's \"Best\"\nMix".into(),
            },
            &ctx(),
        );
        assert!(s.contains(r#"user playlist "Mom's \"Best\" Mix""#));
        assert!(!s.contains("Best\"\n"));
    }

    #[test]
    fn search_query_is_capped_and_limit_clamped() {
        let s = encode_script(
            &Request::Search {
                query: "x".repeat(300),
                limit: 500,
            },
            &ctx(),
        );
        assert!(s.contains(&format!("contains \"{}\"", "x".repeat(100))));
        assert!(!s.contains(&"x".repeat(101)));
        assert!(s.contains("≥ 50"));
    }

    #[test]
    fn rebuild_lists_positions_in_order() {
        let s = encode_script(
            &Request::RebuildQueue {
                source: "Road Trip".into(),
                order: vec![3, 4, 5],
            },
            &ctx(),
        );
        assert!(s.contains("repeat with i in {3, 4, 5}"));
        assert!(s.contains("user playlist \"amtui Queue\""));
        assert!(s.contains("set shuffle enabled to false"));
        assert!(s.contains("NO_PLAYLIST:Road Trip"));
    }

    #[test]
    fn add_to_queue_prefers_artist_and_moves_to_position() {
        let s = encode_script(
            &Request::AddToQueue {
                name: "Intro".into(),
                artist: Some("The xx".into()),
                position: Some(2),
            },
            &ctx(),
        );
        assert!(s.contains("whose name is \"Intro\""));
        assert!(s.contains("if artist of t is \"The xx\""));
        assert!(s.contains("repeat (n - 2) times"));

        let plain = encode_script(
            &Request::AddToQueue {
                name: "Intro".into(),
                artist: None,
                position: None,
            },
            &ctx(),
        );
        assert!(!plain.contains("artist of t is"));
        assert!(!plain.contains("repeat (n -"));
    }

    #[test]
    fn custom_application_and_queue_names() {
        let ctx = ScriptContext {
            application: "iTunes".into(),
            queue_name: "Up Next".into(),
        };
        let s = encode_script(&Request::PlayQueue, &ctx);
        assert!(s.contains("tell application \"iTunes\""));
        assert!(s.contains("play user playlist \"Up Next\""));
    }
}
