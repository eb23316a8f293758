use std::num::ParseIntError;

use thiserror::Error;

use crate::validator::ValidationError;

/// Structural failures of the wire format.
///
/// Per-token conversion failures are not represented here; they surface as
/// [`Error::Number`] or [`Error::Timestamp`] carrying the native error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty message")]
    Empty,
    #[error("invalid argument count: expected {expected}, got {found}")]
    ArgumentCount { expected: usize, found: usize },
    #[error("bad header")]
    BadHeader,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Number(#[from] ParseIntError),
    #[error(transparent)]
    Timestamp(#[from] time::error::Parse),
    #[error("queue full")]
    QueueFull,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("line {line}: {source}")]
    Rejected { line: usize, source: Box<Error> },
}

impl Error {
    /// True for failures caused by the message itself rather than the
    /// receiver's state or environment.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::Parsing(_) | Error::Validation(_) | Error::Number(_) | Error::Timestamp(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
