//! Music.app control over AppleScript: wire codec, playback client and the
//! managed queue builder.

pub mod automation;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod queue;
pub mod script;

pub use automation::{Automation, Osascript};
pub use client::PlaybackClient;
pub use config::Config;
pub use error::{BuildError, DecodeError, Error, InvocationError};
pub use model::{
    PlaybackStatus, PlayerState, Playlist, QueueEntry, QueueSnapshot, RepeatMode, Track,
};
