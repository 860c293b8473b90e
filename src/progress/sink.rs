//! Progress reporting for a single chunk.

use super::style::ProgressBarOpts;
use crate::chunk::{ByteRange, CallbackId, ChunkRequest, ChunkSink, ChunkSummary};

use bytes::Bytes;
use indicatif::ProgressBar;

/// A [`ChunkSink`] decorator advancing a progress bar with every accepted segment.
///
/// ```rust
/// use rangefetch::chunk::{ByteRange, CallbackId, ChunkRequest, ChunkSummary, FnSink};
/// use rangefetch::progress::{ProgressBarOpts, ProgressSink};
///
/// let request = ChunkRequest::new("https://example.com/file.bin")
///     .with_range(ByteRange::new(0, Some(1023)));
/// let sink = ProgressSink::new(
///     FnSink::new(|_: CallbackId, _: u64, _: bytes::Bytes| true, |_: &ChunkSummary| {}),
///     &request,
///     ProgressBarOpts::hidden(),
/// );
/// assert!(sink.progress_bar().is_hidden());
/// ```
#[derive(Debug)]
pub struct ProgressSink<S> {
    inner: S,
    pb: ProgressBar,
    clear: bool,
}

impl<S: ChunkSink> ProgressSink<S> {
    /// Wraps `inner`, sizing the bar from `request`.
    pub fn new(inner: S, request: &ChunkRequest, opts: ProgressBarOpts) -> Self {
        let pb = opts.to_progress_bar(expected_len(request));
        Self {
            inner,
            pb,
            clear: opts.clears(),
        }
    }

    /// Wraps `inner` with an existing progress bar, e.g. one added to a `MultiProgress`.
    pub fn with_progress_bar(inner: S, pb: ProgressBar, clear: bool) -> Self {
        Self { inner, pb, clear }
    }

    /// The progress bar driven by this sink.
    pub fn progress_bar(&self) -> &ProgressBar {
        &self.pb
    }

    /// Unwraps the decorated sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Number of bytes the request is expected to deliver.
///
/// A bounded range gives its own length; otherwise the total size hint,
/// minus the starting offset, is used when present.
pub fn expected_len(request: &ChunkRequest) -> Option<u64> {
    let ByteRange { begin, end } = request.range;
    match end {
        Some(end) if end > 0 => request.range.len(),
        _ => request
            .expected_total_size
            .map(|total| total.saturating_sub(begin)),
    }
}

impl<S: ChunkSink> ChunkSink for ProgressSink<S> {
    fn write(&mut self, id: CallbackId, offset: u64, data: Bytes) -> bool {
        let len = data.len() as u64;
        let accepted = self.inner.write(id, offset, data);
        if accepted {
            self.pb.inc(len);
        }
        accepted
    }

    fn finish(&mut self, summary: &ChunkSummary) {
        if summary.is_success() {
            if self.clear {
                self.pb.finish_and_clear();
            } else {
                self.pb.finish();
            }
        } else {
            self.pb.abandon_with_message(format!("failed ({})", summary.code()));
        }
        self.inner.finish(summary);
    }

    fn cancelled(&mut self, id: CallbackId, range: ByteRange) {
        self.pb.abandon_with_message("cancelled");
        self.inner.cancelled(id, range);
    }
}
