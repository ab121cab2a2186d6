//! Background work queue for player mutations.
//!
//! Jobs are fire-and-forget: the UI loop submits and moves on. One worker
//! drains the channel in order, so a volume burst lands in the order it was
//! typed. Failures only reach the log.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use music_proto::PlaybackClient;

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    ToggleShuffle,
    CycleRepeat,
    ChangeVolume(i16),
    SeekRelative(f64),
    /// Rebuild the managed queue from a playlist and start it.
    PlayFromPosition {
        playlist: String,
        position: usize,
        shuffle: bool,
    },
    /// Play a single library track (search results).
    PlayTrack { id: String },
    /// Turn shuffle off and jump to a 1-based queue position.
    SkipTo(usize),
    AddToQueue { name: String, artist: String },
    PlayNext { name: String, artist: String },
    CleanupQueue,
}

impl Job {
    pub fn label(&self) -> &'static str {
        match self {
            Job::TogglePlayPause => "toggle_play_pause",
            Job::NextTrack => "next_track",
            Job::PreviousTrack => "previous_track",
            Job::ToggleShuffle => "toggle_shuffle",
            Job::CycleRepeat => "cycle_repeat",
            Job::ChangeVolume(_) => "change_volume",
            Job::SeekRelative(_) => "seek_relative",
            Job::PlayFromPosition { .. } => "play_from_position",
            Job::PlayTrack { .. } => "play_track",
            Job::SkipTo(_) => "skip_to",
            Job::AddToQueue { .. } => "add_to_queue",
            Job::PlayNext { .. } => "play_next",
            Job::CleanupQueue => "cleanup_queue",
        }
    }

    pub async fn run(&self, client: &PlaybackClient) -> anyhow::Result<()> {
        match self {
            Job::TogglePlayPause => {
                let state = client.toggle_play_pause().await?;
                debug!("player now {}", state.label());
            }
            Job::NextTrack => client.next_track().await?,
            Job::PreviousTrack => client.previous_track().await?,
            Job::ToggleShuffle => {
                let on = client.toggle_shuffle().await?;
                debug!("shuffle now {}", on);
            }
            Job::CycleRepeat => {
                let mode = client.cycle_repeat().await?;
                debug!("repeat now {}", mode);
            }
            Job::ChangeVolume(delta) => {
                let volume = client.change_volume(*delta).await?;
                debug!("volume now {}", volume);
            }
            Job::SeekRelative(delta) => {
                client.seek_relative(*delta).await?;
            }
            Job::PlayFromPosition {
                playlist,
                position,
                shuffle,
            } => {
                client
                    .play_from_position(playlist, *position, *shuffle)
                    .await
                    .with_context(|| format!("play {:?} from {}", playlist, position))?;
            }
            Job::PlayTrack { id } => client.play_track(id).await?,
            Job::SkipTo(position) => {
                client.set_shuffle(false).await?;
                client.skip_to_queue_position(*position).await?;
            }
            Job::AddToQueue { name, artist } => {
                client.add_to_queue(name, non_empty(artist)).await?;
                info!("queued {:?}", name);
            }
            Job::PlayNext { name, artist } => {
                client.play_next(name, non_empty(artist)).await?;
                info!("playing {:?} next", name);
            }
            Job::CleanupQueue => client.cleanup_queue().await?,
        }
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Handle for submitting jobs. Cloning is cheap.
#[derive(Clone)]
pub struct WorkQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl WorkQueue {
    /// A queue plus the receiving end a worker drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Job>) {
        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        (Self { tx }, rx)
    }

    pub fn submit(&self, job: Job) {
        if self.tx.send(job).is_err() {
            warn!("work queue closed; job dropped");
        }
    }
}

/// Start the worker. It exits once every [`WorkQueue`] handle is dropped.
pub fn spawn_worker(client: Arc<PlaybackClient>) -> (WorkQueue, tokio::task::JoinHandle<()>) {
    let (queue, mut rx) = WorkQueue::channel();
    let handle = tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let started = Instant::now();
            match job.run(&client).await {
                Ok(()) => debug!("job {} done in {:?}", job.label(), started.elapsed()),
                Err(e) => warn!("job {} failed: {:#}", job.label(), e),
            }
        }
        debug!("worker: channel closed");
    });
    (queue, handle)
}
