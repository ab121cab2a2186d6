//! Playback client: typed operations over the automation boundary.
//!
//! Each call encodes one [`Request`], runs it, and decodes the reply. The
//! read-then-write helpers (`toggle_*`, `cycle_repeat`, `change_volume`)
//! are two calls and race with changes made elsewhere in the player.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::automation::Automation;
use crate::codec::{decode, Ack, Decode, PlaylistNames};
use crate::error::{Error, Result};
use crate::model::{PlaybackStatus, PlayerState, Playlist, QueueSnapshot, RepeatMode, Track};
use crate::script::{encode_script, Request, ScriptContext};

/// Hard cap on search results.
pub const SEARCH_LIMIT: usize = 50;

#[derive(Clone)]
pub struct PlaybackClient {
    automation: Arc<dyn Automation>,
    ctx: ScriptContext,
    search_limit: usize,
}

impl PlaybackClient {
    pub fn new(automation: Arc<dyn Automation>, ctx: ScriptContext) -> Self {
        Self {
            automation,
            ctx,
            search_limit: SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.clamp(1, SEARCH_LIMIT);
        self
    }

    pub fn queue_name(&self) -> &str {
        &self.ctx.queue_name
    }

    pub(crate) async fn call<T: Decode>(&self, request: Request) -> Result<T> {
        let script = encode_script(&request, &self.ctx);
        let started = Instant::now();
        let raw = self.automation.run(&script).await;
        debug!(
            "{} finished in {:?} (ok={})",
            request.kind(),
            started.elapsed(),
            raw.is_ok()
        );
        decode(&raw?)
    }

    async fn command(&self, request: Request) -> Result<()> {
        self.call::<Ack>(request).await.map(|_| ())
    }

    // ── Transport ────────────────────────────────────────────────────────────

    pub async fn play(&self) -> Result<()> {
        self.command(Request::Play).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.command(Request::Pause).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.command(Request::Stop).await
    }

    pub async fn next_track(&self) -> Result<()> {
        self.command(Request::NextTrack).await
    }

    pub async fn previous_track(&self) -> Result<()> {
        self.command(Request::PreviousTrack).await
    }

    pub async fn player_state(&self) -> Result<PlayerState> {
        self.call(Request::GetPlayerState).await
    }

    /// Reads the state, then plays or pauses. Returns the state requested.
    pub async fn toggle_play_pause(&self) -> Result<PlayerState> {
        match self.player_state().await? {
            PlayerState::Playing => {
                self.pause().await?;
                Ok(PlayerState::Paused)
            }
            PlayerState::Paused | PlayerState::Stopped => {
                self.play().await?;
                Ok(PlayerState::Playing)
            }
        }
    }

    pub async fn seek(&self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() {
            return Err(Error::Validation(format!("seek target {seconds}")));
        }
        self.command(Request::Seek(seconds.max(0.0))).await
    }

    /// Move the play head by `delta` seconds within the current track.
    pub async fn seek_relative(&self, delta: f64) -> Result<f64> {
        let status = self.playback_status().await?;
        let mut target = (status.position + delta).max(0.0);
        if status.duration > 0.0 {
            target = target.min(status.duration);
        }
        self.seek(target).await?;
        Ok(target)
    }

    // ── Volume / shuffle / repeat ────────────────────────────────────────────

    pub async fn volume(&self) -> Result<u8> {
        self.call(Request::GetVolume).await
    }

    pub async fn set_volume(&self, volume: u8) -> Result<()> {
        if volume > 100 {
            return Err(Error::Validation(format!("volume {volume} above 100")));
        }
        self.command(Request::SetVolume(volume)).await
    }

    /// Adds `delta` to the current volume, clamped to 0..=100.
    pub async fn change_volume(&self, delta: i16) -> Result<u8> {
        let current = self.volume().await? as i16;
        let next = (current + delta).clamp(0, 100) as u8;
        self.set_volume(next).await?;
        Ok(next)
    }

    pub async fn shuffle(&self) -> Result<bool> {
        self.call(Request::GetShuffle).await
    }

    pub async fn set_shuffle(&self, on: bool) -> Result<()> {
        self.command(Request::SetShuffle(on)).await
    }

    pub async fn toggle_shuffle(&self) -> Result<bool> {
        let next = !self.shuffle().await?;
        self.set_shuffle(next).await?;
        Ok(next)
    }

    pub async fn repeat(&self) -> Result<RepeatMode> {
        self.call(Request::GetRepeat).await
    }

    pub async fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.command(Request::SetRepeat(mode)).await
    }

    /// off → all → one → off
    pub async fn cycle_repeat(&self) -> Result<RepeatMode> {
        let next = self.repeat().await?.next();
        self.set_repeat(next).await?;
        Ok(next)
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        if query.trim().is_empty() {
            return Err(Error::Validation("empty search query".into()));
        }
        let mut tracks: Vec<Track> = self
            .call(Request::Search {
                query: query.to_string(),
                limit: self.search_limit,
            })
            .await?;
        tracks.truncate(self.search_limit);
        Ok(tracks)
    }

    pub async fn current_track(&self) -> Result<Option<Track>> {
        self.call(Request::CurrentTrack).await
    }

    pub async fn playback_status(&self) -> Result<PlaybackStatus> {
        self.call(Request::PlaybackStatus).await
    }

    /// User playlists, without the managed queue.
    pub async fn playlist_names(&self) -> Result<Vec<String>> {
        let names: PlaylistNames = self.call(Request::PlaylistNames).await?;
        Ok(names.without(&self.ctx.queue_name))
    }

    pub async fn playlist(&self, name: &str) -> Result<Playlist> {
        let tracks: Vec<Track> = self
            .call(Request::Playlist {
                name: name.to_string(),
            })
            .await?;
        Ok(Playlist {
            name: name.to_string(),
            tracks,
        })
    }

    pub async fn queue_snapshot(&self) -> Result<QueueSnapshot> {
        self.call(Request::QueueSnapshot).await
    }

    // ── Queue edits ──────────────────────────────────────────────────────────

    /// Jump to a 1-based position of the active playlist.
    ///
    /// The position is checked against a fresh snapshot before the skip is
    /// sent; the skip script re-checks in case the playlist changed between.
    pub async fn skip_to_queue_position(&self, position: usize) -> Result<()> {
        if position == 0 {
            return Err(Error::Validation("queue positions start at 1".into()));
        }
        let total = self.queue_snapshot().await?.total_tracks;
        if position > total {
            return Err(Error::Validation(format!(
                "position {position} out of range (queue has {total} tracks)"
            )));
        }
        self.command(Request::SkipToQueuePosition(position)).await
    }

    pub async fn add_to_queue(&self, name: &str, artist: Option<&str>) -> Result<()> {
        self.add(name, artist, None).await
    }

    pub async fn add_to_queue_at(
        &self,
        name: &str,
        artist: Option<&str>,
        position: usize,
    ) -> Result<()> {
        if position == 0 {
            return Err(Error::Validation("queue positions start at 1".into()));
        }
        self.add(name, artist, Some(position)).await
    }

    /// Insert right after the playing entry of the managed queue, or at the
    /// front when the queue isn't active.
    pub async fn play_next(&self, name: &str, artist: Option<&str>) -> Result<()> {
        let snapshot = self.queue_snapshot().await?;
        let position = if snapshot.is_managed(&self.ctx.queue_name) && snapshot.current_position > 0
        {
            snapshot.current_position + 1
        } else {
            1
        };
        self.add(name, artist, Some(position)).await
    }

    async fn add(&self, name: &str, artist: Option<&str>, position: Option<usize>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation("track name is empty".into()));
        }
        self.command(Request::AddToQueue {
            name: name.to_string(),
            artist: artist.map(str::to_string),
            position,
        })
        .await
    }

    pub async fn play_queue(&self) -> Result<()> {
        self.command(Request::PlayQueue).await
    }

    /// Play a library track by persistent identifier.
    pub async fn play_track(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation("track has no identifier".into()));
        }
        self.command(Request::PlayTrack { id: id.to_string() }).await
    }
}
