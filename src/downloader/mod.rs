//! Downloader module containing the chunk downloader, its builder and configuration.
//!
//! # Overview
//!
//! - `downloader` - [`ChunkDownloader`], request setup and the worker task
//! - `builder` - [`ChunkDownloaderBuilder`] for configuring a downloader
//! - `config` - [`DownloaderConfig`] gathered by the builder
//! - `state` - [`TaskState`] and the shared [`TaskControl`] used for cancellation
//! - `stream` - the body pump reading with [`BUFFER_SIZES`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::chunk::{ByteRange, CallbackId, ChunkSummary, FnSink};
//! use rangefetch::downloader::{ChunkDownloaderBuilder, TaskState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = ChunkDownloaderBuilder::new("https://example.com/file.bin")
//!     .range(ByteRange::new(1024, None))
//!     .build();
//! let control = downloader.control();
//!
//! let handle = downloader.start(FnSink::new(
//!     |_: CallbackId, _: u64, _: bytes::Bytes| true,
//!     |_: &ChunkSummary| {},
//! ))?;
//!
//! // Stop early; if the worker notices, the sink gets `cancelled` instead of `finish`.
//! control.cancel();
//! if handle.await? == TaskState::Cancelled {
//!     println!("Chunk download cancelled");
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod state;
pub mod stream;

pub use builder::ChunkDownloaderBuilder;
pub use config::DownloaderConfig;
pub use downloader::ChunkDownloader;
pub use state::{TaskControl, TaskState};
pub use stream::BUFFER_SIZES;
