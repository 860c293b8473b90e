//! Chunk summary functionality.
//!
//! This module contains the [`ChunkSummary`] struct and [`Status`] enum handed
//! to [`ChunkSink::finish`](super::ChunkSink::finish) once a chunk download
//! reaches its terminal state.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::chunk::{ByteRange, CallbackId, ChunkSummary, Status};
//! use rangefetch::ChunkError;
//!
//! let summary = ChunkSummary::new(CallbackId(1), ByteRange::new(0, Some(99)), 100)
//!     .with_status(Status::Success);
//! assert_eq!(summary.code(), 200);
//!
//! let failed = ChunkSummary::new(CallbackId(1), ByteRange::new(0, Some(99)), 0)
//!     .fail(ChunkError::HttpStatus(404));
//! assert_eq!(failed.code(), 404);
//! ```

use super::request::ByteRange;
use super::sink::CallbackId;
use crate::error::ChunkError;

/// Chunk download status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Download not finished yet
    NotStarted,
    /// Every byte of the response was accepted by the sink
    Success,
    /// Download failed
    Fail(ChunkError),
}

/// Terminal report of a chunk download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSummary {
    /// Correlation identifier of the download.
    id: CallbackId,
    /// Requested range.
    range: ByteRange,
    /// Bytes accepted by the sink.
    downloaded: u64,
    /// Status.
    status: Status,
}

impl ChunkSummary {
    /// Create a new [`ChunkSummary`].
    pub fn new(id: CallbackId, range: ByteRange, downloaded: u64) -> Self {
        Self {
            id,
            range,
            downloaded,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`ChunkSummary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Mark the summary as failed.
    pub fn fail(self, error: ChunkError) -> Self {
        Self {
            status: Status::Fail(error),
            ..self
        }
    }

    /// Get the correlation identifier.
    pub fn id(&self) -> CallbackId {
        self.id
    }

    /// Get the requested range.
    pub fn range(&self) -> ByteRange {
        self.range
    }

    /// Get the number of bytes accepted by the sink.
    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the error, if the download failed.
    pub fn error(&self) -> Option<ChunkError> {
        match self.status {
            Status::Fail(error) => Some(error),
            _ => None,
        }
    }

    /// Whether the download completed successfully.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Numeric status code: `200` on success, otherwise [`ChunkError::code`].
    pub fn code(&self) -> i64 {
        match self.status {
            Status::Success => ChunkError::SUCCESS_CODE,
            Status::Fail(error) => error.code(),
            Status::NotStarted => ChunkError::NOT_SET_CODE,
        }
    }
}
