//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `sink` - [`ProgressSink`], a [`ChunkSink`](crate::chunk::ChunkSink) decorator
//!   driving a progress bar
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::chunk::{CallbackId, ChunkSummary, FnSink};
//! use rangefetch::downloader::ChunkDownloaderBuilder;
//! use rangefetch::progress::{ProgressBarOpts, ProgressSink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = ChunkDownloaderBuilder::new("https://example.com/file.bin")
//!     .expected_total_size(1_000_000)
//!     .build();
//! let sink = ProgressSink::new(
//!     FnSink::new(|_: CallbackId, _: u64, _: bytes::Bytes| true, |_: &ChunkSummary| {}),
//!     downloader.request(),
//!     ProgressBarOpts::with_pip_style(),
//! );
//! downloader.start(sink)?.await?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod sink;
pub(crate) mod style;

pub use sink::{expected_len, ProgressSink};
pub use style::ProgressBarOpts;
