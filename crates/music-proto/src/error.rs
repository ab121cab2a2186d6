//! Error taxonomy shared by the codec, client and queue builder.

use std::time::Duration;

use thiserror::Error;

/// The automation process itself could not run or did not finish.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to spawn automation process: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("automation call timed out after {0:?}")]
    Timeout(Duration),
    #[error("automation exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },
}

/// The response text did not match the expected wire shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed record: expected {expected} fields, found {found}")]
    MalformedRecord { expected: usize, found: usize },
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Invocation(#[from] InvocationError),
    /// Failure text reported by the player; the message is kept verbatim.
    #[error("{0}")]
    Service(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("position {position} is outside 1..={len}")]
    InvalidPosition { position: usize, len: usize },
    #[error("source playlist not found: {0}")]
    SourceNotFound(String),
    #[error("queue rebuild failed: {0}")]
    Service(String),
}

impl From<Error> for BuildError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(name) => BuildError::SourceNotFound(name),
            other => BuildError::Service(other.to_string()),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
