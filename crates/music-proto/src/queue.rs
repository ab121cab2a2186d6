//! Queue builder: rebuilds the managed queue playlist from a source playlist.
//!
//! The order is planned locally and shipped to the player in one script,
//! which clears (or creates) the queue, duplicates the tracks in that order
//! and turns remote shuffle off. A failure part-way leaves the queue in
//! whatever state the player reached.

use rand::Rng;
use tracing::{debug, info};

use crate::client::PlaybackClient;
use crate::codec::Ack;
use crate::error::BuildError;
use crate::model::Playlist;
use crate::script::Request;

/// In-place Fisher–Yates: for `i` from the last index down to 1, swap with a
/// uniformly chosen `j` in `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// 1-based source positions in queue order.
///
/// The selected track always comes first. With `shuffle` every other track
/// follows in random order; without it only the tracks after the selection
/// follow, in playlist order.
pub fn plan_order<R: Rng + ?Sized>(
    len: usize,
    position: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<usize>, BuildError> {
    if position < 1 || position > len {
        return Err(BuildError::InvalidPosition { position, len });
    }

    let mut order = Vec::with_capacity(len);
    order.push(position);

    if shuffle {
        let mut rest: Vec<usize> = (1..=len).filter(|&i| i != position).collect();
        fisher_yates(&mut rest, rng);
        order.extend(rest);
    } else {
        order.extend(position + 1..=len);
    }
    Ok(order)
}

impl PlaybackClient {
    /// Clear the managed queue and refill it starting at `position`.
    pub async fn rebuild_queue(
        &self,
        source: &Playlist,
        position: usize,
        shuffle: bool,
    ) -> Result<Vec<usize>, BuildError> {
        let order = plan_order(source.tracks.len(), position, shuffle, &mut rand::thread_rng())?;
        self.rebuild_queue_in_order(&source.name, order).await
    }

    pub async fn rebuild_queue_in_order(
        &self,
        source: &str,
        order: Vec<usize>,
    ) -> Result<Vec<usize>, BuildError> {
        debug!("rebuilding {:?} from {:?}: {:?}", self.queue_name(), source, order);
        self.call::<Ack>(Request::RebuildQueue {
            source: source.to_string(),
            order: order.clone(),
        })
        .await?;
        info!("queue rebuilt from {:?} with {} tracks", source, order.len());
        Ok(order)
    }

    /// Fetch `playlist`, rebuild the queue from `position` and start it.
    pub async fn play_from_position(
        &self,
        playlist: &str,
        position: usize,
        shuffle: bool,
    ) -> Result<(), BuildError> {
        let source = self.playlist(playlist).await?;
        self.rebuild_queue(&source, position, shuffle).await?;
        self.play_queue().await?;
        Ok(())
    }

    /// Drop queue entries before the playing one, when the managed queue is
    /// the active playlist. Anything else is a no-op.
    pub async fn cleanup_queue(&self) -> crate::error::Result<()> {
        self.call::<Ack>(Request::CleanupQueue).await.map(|_| ())
    }
}
