//! Chunk module containing the types exchanged with a chunk download.
//!
//! # Overview
//!
//! - [`request`] - The immutable [`ChunkRequest`] descriptor and its [`ByteRange`]
//! - [`sink`] - The [`ChunkSink`] callback seam and the closure-based [`FnSink`]
//! - [`summary`] - The terminal [`ChunkSummary`] and its [`Status`]
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::chunk::{ByteRange, ChunkRequest};
//!
//! let request = ChunkRequest::new("https://example.com/file.bin")
//!     .with_range(ByteRange::from_raw(4096, -1));
//! assert_eq!(request.range_header().as_deref(), Some("bytes=4096-"));
//! ```

pub mod request;
pub mod sink;
pub mod summary;

pub use request::{ByteRange, ChunkRequest, DEFAULT_USER_AGENT};
pub use sink::{CallbackId, ChunkSink, FnSink};
pub use summary::{ChunkSummary, Status};
