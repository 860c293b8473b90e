//! Rangefetch downloads one byte range of an HTTP resource at a time and
//! hands every received segment to a caller-owned sink.
//!
//! It is the building block of a multi-chunk download manager: the manager
//! splits a file into ranges, runs one [`ChunkDownloader`] per range and
//! reassembles the segments it receives at their absolute offsets.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rangefetch::chunk::{ByteRange, CallbackId, ChunkSummary, FnSink};
//! use rangefetch::ChunkDownloaderBuilder;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = ChunkDownloaderBuilder::new("https://example.com/world.mwm")
//!     .id(CallbackId(1))
//!     .range(ByteRange::new(0, Some(1_048_575)))
//!     .user_agent("MapsDownloader/1.0")
//!     .build();
//!
//! let sink = FnSink::new(
//!     |_id: CallbackId, offset: u64, data: bytes::Bytes| {
//!         println!("{} bytes at {}", data.len(), offset);
//!         true
//!     },
//!     |summary: &ChunkSummary| println!("done: {}", summary.code()),
//! );
//! downloader.start(sink)?.await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`chunk`] - Request descriptor, sink trait and terminal summary
//! - [`downloader`] - The [`ChunkDownloader`], its builder, task state and body pump
//! - [`error`] - Error types and the stable numeric codes reported on finish
//! - [`http`] - HTTP client setup
//! - [`progress`] - Progress bar reporting as a sink decorator
//! - [`utils`] - Response header helpers

pub mod chunk;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use chunk::{ByteRange, CallbackId, ChunkRequest, ChunkSink, ChunkSummary, FnSink, Status};
pub use downloader::{ChunkDownloader, ChunkDownloaderBuilder, TaskControl, TaskState};
pub use error::{ChunkError, Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, ProgressSink};
