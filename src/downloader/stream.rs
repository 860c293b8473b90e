//! Response body pump with degrading buffer sizes.
//!
//! Slow or unstable connections tend to time out in the middle of large
//! reads. The pump drains the body with a 64 KiB buffer first and, when a
//! read fails, resumes from the current stream position with 32 KiB and
//! then 1 KiB buffers. The list is bounded: once the 1 KiB attempt fails the
//! chunk fails with [`ChunkError::Io`].
//!
//! A failed body stream usually ends right after its error. End of stream
//! reached after a failed read, with no byte accepted since, is therefore a
//! failed attempt too.

use crate::chunk::{CallbackId, ChunkSink};
use crate::error::ChunkError;

use bytes::Bytes;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Read buffer sizes, tried in order.
pub const BUFFER_SIZES: [usize; 3] = [64 * 1024, 32 * 1024, 1024];

/// How a drain ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Drained {
    /// End of stream reached, every byte accepted.
    Complete,
    /// Cancellation was observed.
    Cancelled,
}

enum AttemptError {
    Io(io::Error),
    Rejected,
}

/// Moves bytes from a response body into a [`ChunkSink`].
pub(crate) struct StreamPump<'a, S: ?Sized> {
    id: CallbackId,
    begin: u64,
    expected_len: Option<u64>,
    downloaded: u64,
    failed_since_progress: bool,
    token: &'a CancellationToken,
    sink: &'a mut S,
}

impl<'a, S: ChunkSink + ?Sized> StreamPump<'a, S> {
    pub(crate) fn new(
        id: CallbackId,
        begin: u64,
        token: &'a CancellationToken,
        sink: &'a mut S,
    ) -> Self {
        Self {
            id,
            begin,
            expected_len: None,
            downloaded: 0,
            failed_since_progress: false,
            token,
            sink,
        }
    }

    /// Body length announced by the server. Ending before it is a read failure.
    pub(crate) fn expect_len(self, expected_len: Option<u64>) -> Self {
        Self {
            expected_len,
            ..self
        }
    }

    /// Bytes accepted by the sink so far.
    pub(crate) fn downloaded(&self) -> u64 {
        self.downloaded
    }

    /// Drains `reader` into the sink. The reader is dropped on return.
    pub(crate) async fn drain<R>(&mut self, mut reader: R) -> Result<Drained, ChunkError>
    where
        R: AsyncRead + Unpin,
    {
        for buffer_size in BUFFER_SIZES {
            match self.drain_with(&mut reader, buffer_size).await {
                Ok(drained) => {
                    debug!(
                        buffer_size,
                        downloaded = self.downloaded,
                        ?drained,
                        "Stream drained"
                    );
                    return Ok(drained);
                }
                Err(AttemptError::Rejected) => {
                    debug!(downloaded = self.downloaded, "Sink rejected a segment");
                    return Err(ChunkError::Write);
                }
                Err(AttemptError::Io(e)) => {
                    self.failed_since_progress = true;
                    warn!(
                        buffer_size,
                        downloaded = self.downloaded,
                        error = %e,
                        "Read failed"
                    );
                }
            }
        }
        Err(ChunkError::Io)
    }

    async fn drain_with<R>(
        &mut self,
        reader: &mut R,
        buffer_size: usize,
    ) -> Result<Drained, AttemptError>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = vec![0u8; buffer_size];
        loop {
            if self.token.is_cancelled() {
                return Ok(Drained::Cancelled);
            }
            let read = reader.read(&mut buf).await.map_err(AttemptError::Io)?;
            if self.token.is_cancelled() {
                return Ok(Drained::Cancelled);
            }
            if read == 0 {
                return self.end_of_stream();
            }

            let offset = self.begin + self.downloaded;
            let segment = Bytes::copy_from_slice(&buf[..read]);
            // A rejection stops the pump and leaves the caller's token alone.
            if !self.sink.write(self.id, offset, segment) {
                return Err(AttemptError::Rejected);
            }
            self.downloaded += read as u64;
            self.failed_since_progress = false;
        }
    }

    fn end_of_stream(&self) -> Result<Drained, AttemptError> {
        if self.failed_since_progress {
            return Err(AttemptError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("body ended after a failed read at {} bytes", self.downloaded),
            )));
        }
        match self.expected_len {
            Some(expected) if self.downloaded < expected => {
                Err(AttemptError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "body ended after {} of {} bytes",
                        self.downloaded, expected
                    ),
                )))
            }
            _ => Ok(Drained::Complete),
        }
    }
}
