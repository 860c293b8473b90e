//! Error handling for the rangefetch library.
//!
//! Two error types live here. [`ChunkError`] is the terminal outcome of a
//! chunk download and is only ever surfaced through
//! [`ChunkSink::finish`](crate::chunk::ChunkSink::finish); it carries the
//! stable numeric codes callers match on. [`Error`] covers misuse of the
//! public API and client construction failures.

use crate::downloader::TaskState;

use thiserror::Error;

/// Terminal failure of a chunk download.
///
/// Every variant maps to a stable numeric code via [`ChunkError::code`].
/// Successful downloads report [`ChunkError::SUCCESS_CODE`] instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// Connection or read failure.
    ///
    /// Reported when the request could not be sent at all, or when reading
    /// the body failed with every buffer size.
    #[error("I/O error")]
    Io,

    /// The URL could not be parsed or is not an HTTP(S) URL.
    ///
    /// No network I/O is attempted in this case.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The sink rejected a segment.
    #[error("Write rejected by sink")]
    Write,

    /// The server answered with something other than `200` or `206`.
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

impl ChunkError {
    /// Code reported for a successful download.
    pub const SUCCESS_CODE: i64 = 200;
    /// Code meaning "no error recorded".
    pub const NOT_SET_CODE: i64 = -1;
    /// Code for [`ChunkError::Io`].
    pub const IO_CODE: i64 = -2;
    /// Code for [`ChunkError::InvalidUrl`].
    pub const INVALID_URL_CODE: i64 = -3;
    /// Code for [`ChunkError::Write`].
    pub const WRITE_CODE: i64 = -4;

    /// Numeric code of the error.
    ///
    /// Internal failures are negative; HTTP failures report the raw status.
    pub fn code(&self) -> i64 {
        match self {
            ChunkError::Io => Self::IO_CODE,
            ChunkError::InvalidUrl => Self::INVALID_URL_CODE,
            ChunkError::Write => Self::WRITE_CODE,
            ChunkError::HttpStatus(status) => i64::from(*status),
        }
    }
}

/// Errors that can happen when using the rangefetch API.
#[derive(Error, Debug)]
pub enum Error {
    /// `start` was called on a downloader that already left the pending state.
    #[error("Chunk download already started (state: {0:?})")]
    AlreadyStarted(TaskState),

    /// Error from the Reqwest library.
    ///
    /// Returned when the HTTP client cannot be built.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a rangefetch error.
pub type Result<T> = std::result::Result<T, Error>;
