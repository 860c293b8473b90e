//! Content length extraction utilities.
//!
//! This module reads the body length and the served range out of an HTTP
//! response, from the `Content-Length` and `Content-Range` headers.

use reqwest::header::CONTENT_RANGE;
use reqwest::Response;

/// A parsed `Content-Range` header: `bytes <start>-<end>/<total>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// First byte served.
    pub start: u64,
    /// Last byte served, inclusive.
    pub end: u64,
    /// Size of the whole resource, `None` when the server sent `*`.
    pub total: Option<u64>,
}

/// Body length announced by the response, if any.
pub fn body_length(response: &Response) -> Option<u64> {
    response.content_length()
}

/// Parsed `Content-Range` header of the response, if any.
pub fn content_range(response: &Response) -> Option<ContentRange> {
    response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_range)
}

/// Parse a `Content-Range` header value.
///
/// # Example
///
/// ```rust
/// use rangefetch::utils::{parse_content_range, ContentRange};
///
/// let range = parse_content_range("bytes 200-1023/1024");
/// assert_eq!(range, Some(ContentRange { start: 200, end: 1023, total: Some(1024) }));
/// ```
pub fn parse_content_range(content_range: &str) -> Option<ContentRange> {
    let spec = content_range.trim().strip_prefix("bytes")?.trim_start();
    let (range, total) = spec.split_once('/')?;
    let (start, end) = range.split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = end.trim().parse::<u64>().ok()?;
    let total = match total.trim() {
        "*" => None,
        total => Some(total.parse::<u64>().ok()?),
    };
    if end < start {
        return None;
    }
    Some(ContentRange { start, end, total })
}
