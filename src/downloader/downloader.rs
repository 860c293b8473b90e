//! Core chunk downloader implementation.
//!
//! This module contains the [`ChunkDownloader`] struct which owns one HTTP
//! request for one byte range of one URL. Once started, a worker task sends
//! the request, streams the body into a [`ChunkSink`] and reports the outcome
//! through [`ChunkSink::finish`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::chunk::{ByteRange, CallbackId, ChunkSummary, FnSink};
//! use rangefetch::downloader::ChunkDownloaderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = ChunkDownloaderBuilder::new("https://example.com/file.bin")
//!     .id(CallbackId(1))
//!     .range(ByteRange::new(0, Some(65_535)))
//!     .build();
//!
//! let sink = FnSink::new(
//!     |_id: CallbackId, offset: u64, data: bytes::Bytes| {
//!         println!("{} bytes at offset {}", data.len(), offset);
//!         true
//!     },
//!     |summary: &ChunkSummary| println!("finished with {}", summary.code()),
//! );
//!
//! let state = downloader.start(sink)?.await?;
//! println!("Task ended as {:?}", state);
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::state::{TaskControl, TaskState};
use super::stream::{Drained, StreamPump};
use crate::chunk::{CallbackId, ChunkRequest, ChunkSink, ChunkSummary, Status};
use crate::error::{ChunkError, Result};
use crate::http::create_http_client;
use crate::utils::{body_length, content_range};

use futures::TryStreamExt;
use reqwest::{
    header::{RANGE, USER_AGENT},
    Method, StatusCode, Url,
};
use std::fmt;
use std::io;
use tokio::task::JoinHandle;
use tokio_util::io::StreamReader;
use tracing::{debug, info_span, warn, Instrument};

/// Downloads one byte range of one resource.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use rangefetch::downloader::ChunkDownloaderBuilder;
///
/// let d = ChunkDownloaderBuilder::new("https://example.com/file.bin").build();
/// # }
/// ```
pub struct ChunkDownloader {
    config: DownloaderConfig,
    control: TaskControl,
}

impl fmt::Debug for ChunkDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkDownloader")
            .field("config", &self.config)
            .field("state", &self.control.state())
            .finish()
    }
}

impl ChunkDownloader {
    /// Creates a downloader for `request`. Nothing is validated here.
    pub fn new(id: CallbackId, request: ChunkRequest) -> Self {
        Self::from_config(DownloaderConfig {
            id,
            request,
            ..DownloaderConfig::default()
        })
    }

    pub(crate) fn from_config(config: DownloaderConfig) -> Self {
        Self {
            config,
            control: TaskControl::new(),
        }
    }

    /// Gets the correlation identifier.
    pub fn id(&self) -> CallbackId {
        self.config.id
    }

    /// Gets the request descriptor.
    pub fn request(&self) -> &ChunkRequest {
        &self.config.request
    }

    /// Gets the current task state.
    pub fn state(&self) -> TaskState {
        self.control.state()
    }

    /// Gets a handle to observe or cancel the download from elsewhere.
    pub fn control(&self) -> TaskControl {
        self.control.clone()
    }

    /// Requests cancellation.
    ///
    /// The worker notices it before its next blocking operation; a read in
    /// progress runs until it completes or times out.
    pub fn cancel(&self) {
        self.control.cancel();
    }

    /// Starts the download on a new tokio task.
    ///
    /// The sink is moved into the task and called from there. The returned
    /// handle resolves to the terminal state once the worker is done.
    ///
    /// Must be called from within a tokio runtime. Fails with
    /// [`Error::AlreadyStarted`](crate::Error::AlreadyStarted) when called twice.
    pub fn start<S: ChunkSink>(&self, sink: S) -> Result<JoinHandle<TaskState>> {
        self.control.begin()?;

        let span = info_span!(
            "chunk",
            id = %self.config.id,
            url = %self.config.request.url,
            range = %self.config.request.range,
        );
        let worker = Worker {
            config: self.config.clone(),
            control: self.control.clone(),
        };
        Ok(tokio::spawn(worker.run(sink).instrument(span)))
    }
}

struct Worker {
    config: DownloaderConfig,
    control: TaskControl,
}

impl Worker {
    async fn run<S: ChunkSink>(self, mut sink: S) -> TaskState {
        let mut downloaded = 0;
        let outcome = self.fetch(&mut sink, &mut downloaded).await;

        let id = self.config.id;
        let range = self.config.request.range;
        let cancelled = match outcome {
            Ok(Drained::Cancelled) => true,
            Err(ChunkError::Write) => false,
            _ => self.control.is_cancelled(),
        };
        if cancelled {
            debug!(downloaded, "Chunk download cancelled");
            sink.cancelled(id, range);
            return self.control.settle(TaskState::Cancelled);
        }

        let summary = ChunkSummary::new(id, range, downloaded);
        let summary = match outcome {
            Ok(_) => summary.with_status(Status::Success),
            Err(e) => summary.fail(e),
        };
        debug!(code = summary.code(), downloaded, "Chunk download finished");
        sink.finish(&summary);
        self.control.settle(TaskState::Finished)
    }

    /// Sends the request and drains the response into `sink`.
    ///
    /// The response, and with it the connection, is dropped on every return path.
    async fn fetch<S: ChunkSink>(
        &self,
        sink: &mut S,
        downloaded: &mut u64,
    ) -> std::result::Result<Drained, ChunkError> {
        let request = &self.config.request;
        let url = parse_url(&request.url)?;

        let client = create_http_client(self.config.http.clone()).map_err(|e| {
            warn!(error = %e, "Failed to create HTTP client");
            ChunkError::Io
        })?;
        if self.control.is_cancelled() {
            return Ok(Drained::Cancelled);
        }

        let method = if request.is_post() {
            Method::POST
        } else {
            Method::GET
        };
        debug!(%method, %url, "Requesting chunk");
        let mut req = client
            .request(method, url)
            .header(USER_AGENT, request.user_agent.as_str());
        if let Some(range) = request.range_header() {
            req = req.header(RANGE, range);
        }
        if request.is_post() {
            // A byte body is sent with a fixed Content-Length.
            req = req.body(request.body.clone().into_bytes());
        }

        let res = req.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            ChunkError::Io
        })?;
        if self.control.is_cancelled() {
            return Ok(Drained::Cancelled);
        }

        let status = res.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            debug!(%status, "Unexpected response status");
            return Err(ChunkError::HttpStatus(status.as_u16()));
        }
        match content_range(&res) {
            Some(served) => debug!(
                start = served.start,
                end = served.end,
                total = ?served.total,
                "Server returned a partial body"
            ),
            None if status == StatusCode::OK && request.range_header().is_some() => {
                warn!("Server ignored the Range header and returned the whole resource")
            }
            None => {}
        }

        let expected_len = body_length(&res);
        let body = Box::pin(res.bytes_stream().map_err(io::Error::other));
        let token = self.control.token();
        let mut pump =
            StreamPump::new(self.config.id, request.range.begin, token, sink).expect_len(expected_len);
        let drained = pump.drain(StreamReader::new(body)).await;
        *downloaded = pump.downloaded();
        drained
    }
}

fn parse_url(raw: &str) -> std::result::Result<Url, ChunkError> {
    let url = Url::parse(raw).map_err(|e| {
        debug!(url = raw, error = %e, "Invalid url");
        ChunkError::InvalidUrl
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => {
            debug!(url = raw, scheme, "Unsupported url scheme");
            Err(ChunkError::InvalidUrl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("http://example.com/a").is_ok());
        assert!(parse_url("https://example.com/a?b=c").is_ok());
        assert_eq!(parse_url(""), Err(ChunkError::InvalidUrl));
        assert_eq!(parse_url("example.com/a"), Err(ChunkError::InvalidUrl));
        assert_eq!(parse_url("ftp://example.com/a"), Err(ChunkError::InvalidUrl));
    }

    #[test]
    fn test_downloader_debug() {
        let downloader = ChunkDownloader::new(CallbackId(5), ChunkRequest::new("http://a/b"));
        let debug_str = format!("{:?}", downloader);

        assert!(debug_str.contains("ChunkDownloader"));
        assert!(debug_str.contains("Pending"));
    }

    #[test]
    fn test_cancel_before_start_keeps_pending() {
        let downloader = ChunkDownloader::new(CallbackId(5), ChunkRequest::new("http://a/b"));
        downloader.cancel();

        assert!(downloader.control().is_cancelled());
        assert_eq!(downloader.state(), TaskState::Pending);
    }
}
