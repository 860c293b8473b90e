//! Shared utility functions.
//!
//! - [`content_length`] - Body length and `Content-Range` parsing for HTTP responses

pub mod content_length;

pub use content_length::{body_length, content_range, parse_content_range, ContentRange};
