//! Chunk request descriptor.
//!
//! This module contains the [`ChunkRequest`] struct describing what a single
//! chunk download fetches, and the [`ByteRange`] it covers. Both are
//! immutable once built; nothing is validated up front, a malformed URL is
//! only detected when the download starts.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::chunk::{ByteRange, ChunkRequest};
//!
//! let request = ChunkRequest::new("https://example.com/map.mwm")
//!     .with_range(ByteRange::new(1024, Some(2047)))
//!     .with_user_agent("MapsDownloader/1.0");
//! assert_eq!(request.range_header().as_deref(), Some("bytes=1024-2047"));
//! ```

use std::fmt;

/// Default `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A byte range of a remote resource.
///
/// `end` is inclusive; `None` means "to the end of the resource".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// First byte of the range.
    pub begin: u64,
    /// Last byte of the range, inclusive.
    pub end: Option<u64>,
}

impl ByteRange {
    /// The whole resource.
    pub const FULL: ByteRange = ByteRange {
        begin: 0,
        end: None,
    };

    /// Creates a new [`ByteRange`].
    pub fn new(begin: u64, end: Option<u64>) -> Self {
        Self { begin, end }
    }

    /// Creates a range using the `-1` convention for an unbounded end.
    ///
    /// Any negative `end` is treated as unbounded.
    pub fn from_raw(begin: u64, end: i64) -> Self {
        Self {
            begin,
            end: u64::try_from(end).ok(),
        }
    }

    /// The end of the range, `-1` when unbounded.
    pub fn raw_end(&self) -> i64 {
        self.end
            .and_then(|end| i64::try_from(end).ok())
            .unwrap_or(-1)
    }

    /// Whether this range asks for the whole resource from its start.
    pub fn is_full(&self) -> bool {
        self.begin == 0 && self.end.is_none()
    }

    /// Number of bytes covered, when the range is bounded.
    pub fn len(&self) -> Option<u64> {
        self.end
            .filter(|end| *end >= self.begin)
            .map(|end| end - self.begin + 1)
    }

    /// Value of the `Range` request header for this range.
    ///
    /// Returns `None` when the whole resource is requested. A zero `end`
    /// yields an open-ended range.
    pub fn header_value(&self) -> Option<String> {
        if self.is_full() {
            return None;
        }
        match self.end {
            Some(end) if end > 0 => Some(format!("bytes={}-{}", self.begin, end)),
            _ => Some(format!("bytes={}-", self.begin)),
        }
    }
}

impl Default for ByteRange {
    fn default() -> Self {
        ByteRange::FULL
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.begin, end),
            None => write!(f, "{}-", self.begin),
        }
    }
}

/// Represents one chunk to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    /// URL of the resource, parsed when the download starts.
    pub url: String,
    /// Byte range to fetch.
    pub range: ByteRange,
    /// Size of the whole resource, if known. Advisory only.
    pub expected_total_size: Option<u64>,
    /// Request body. Empty means `GET`, anything else is sent with `POST`.
    pub body: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ChunkRequest {
    /// Creates a request for the whole resource at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            range: ByteRange::FULL,
            expected_total_size: None,
            body: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets the byte range.
    pub fn with_range(self, range: ByteRange) -> Self {
        Self { range, ..self }
    }

    /// Sets the expected total size hint.
    pub fn with_expected_total_size(self, size: u64) -> Self {
        Self {
            expected_total_size: Some(size),
            ..self
        }
    }

    /// Sets the request body, switching the request to `POST`.
    pub fn with_body(self, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..self
        }
    }

    /// Sets the `User-Agent`.
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..self
        }
    }

    /// Whether the request is sent with `POST`.
    pub fn is_post(&self) -> bool {
        !self.body.is_empty()
    }

    /// Value of the `Range` header, if one is sent.
    pub fn range_header(&self) -> Option<String> {
        self.range.header_value()
    }
}
