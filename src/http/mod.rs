//! HTTP module containing HTTP client functionality.
//!
//! - [`client`] - HTTP client creation, fixed timeouts and middleware configuration

pub mod client;

pub use client::{create_http_client, HttpClientConfig, CONNECT_TIMEOUT, READ_TIMEOUT};
