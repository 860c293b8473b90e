//! Callback seam between a chunk download and its consumer.
//!
//! A [`ChunkSink`] receives every segment of the response body through
//! [`ChunkSink::write`] and a single terminal [`ChunkSummary`] through
//! [`ChunkSink::finish`]. The sink is moved into the download's worker task
//! and called from there sequentially, so calls for one download never
//! overlap.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::chunk::{CallbackId, ChunkSink, FnSink};
//!
//! let mut sink = FnSink::new(
//!     |_id: CallbackId, offset: u64, data: bytes::Bytes| {
//!         println!("{} bytes at {}", data.len(), offset);
//!         true
//!     },
//!     |summary: &rangefetch::chunk::ChunkSummary| println!("finished: {}", summary.code()),
//! );
//! assert!(sink.write(CallbackId(1), 0, bytes::Bytes::from_static(b"abc")));
//! ```

use super::request::ByteRange;
use super::summary::ChunkSummary;

use bytes::Bytes;
use std::fmt;

/// Opaque correlation identifier letting a consumer match callbacks to the
/// download that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub u64);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CallbackId {
    fn from(value: u64) -> Self {
        CallbackId(value)
    }
}

/// Consumer of a chunk download.
///
/// Every method runs on the tokio worker task driving the download, not on
/// the context that called `start`. Implementations must not block; hand
/// slow work such as disk writes off to a channel or `spawn_blocking`.
pub trait ChunkSink: Send + 'static {
    /// Hands over a segment starting at the absolute `offset` of the resource.
    ///
    /// Return `true` once the data has been taken over. Returning `false`
    /// aborts the download, which then finishes with
    /// [`ChunkError::Write`](crate::ChunkError::Write).
    fn write(&mut self, id: CallbackId, offset: u64, data: Bytes) -> bool;

    /// Called once when the download finishes, successfully or not.
    ///
    /// Not called for downloads that were cancelled by the caller.
    fn finish(&mut self, summary: &ChunkSummary);

    /// Called instead of [`ChunkSink::finish`] when the download stopped
    /// because the caller cancelled it.
    fn cancelled(&mut self, _id: CallbackId, _range: ByteRange) {}
}

impl<S: ChunkSink + ?Sized> ChunkSink for Box<S> {
    fn write(&mut self, id: CallbackId, offset: u64, data: Bytes) -> bool {
        (**self).write(id, offset, data)
    }

    fn finish(&mut self, summary: &ChunkSummary) {
        (**self).finish(summary)
    }

    fn cancelled(&mut self, id: CallbackId, range: ByteRange) {
        (**self).cancelled(id, range)
    }
}

/// A [`ChunkSink`] built from a pair of closures.
pub struct FnSink<W, F> {
    on_write: W,
    on_finish: F,
}

impl<W, F> FnSink<W, F>
where
    W: FnMut(CallbackId, u64, Bytes) -> bool + Send + 'static,
    F: FnMut(&ChunkSummary) + Send + 'static,
{
    /// Creates a sink calling `on_write` for each segment and `on_finish` at the end.
    pub fn new(on_write: W, on_finish: F) -> Self {
        Self {
            on_write,
            on_finish,
        }
    }
}

impl<W, F> ChunkSink for FnSink<W, F>
where
    W: FnMut(CallbackId, u64, Bytes) -> bool + Send + 'static,
    F: FnMut(&ChunkSummary) + Send + 'static,
{
    fn write(&mut self, id: CallbackId, offset: u64, data: Bytes) -> bool {
        (self.on_write)(id, offset, data)
    }

    fn finish(&mut self, summary: &ChunkSummary) {
        (self.on_finish)(summary)
    }
}

impl<W, F> fmt::Debug for FnSink<W, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}
