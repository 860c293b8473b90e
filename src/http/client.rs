//! HTTP client setup and middleware configuration.
//!
//! Every chunk download builds its own client: connect and read timeouts are
//! fixed at 15 seconds and requests are traced through
//! [`TracingMiddleware`]. No retry middleware is installed, a failed status
//! is reported to the caller as is.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client with Proxy
//!
//! ```rust,no_run
//! use rangefetch::http::{create_http_client, HttpClientConfig};
//! use reqwest::Proxy;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let proxy = Proxy::http("http://proxy.example.com:8080")?;
//! let client = create_http_client(HttpClientConfig { proxy: Some(proxy) })?;
//! # Ok(())
//! # }
//! ```

use reqwest::Proxy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Time allowed to establish a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Time allowed between two successful reads.
pub const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - [`CONNECT_TIMEOUT`] and [`READ_TIMEOUT`]
/// - Tracing middleware for request/response logging
/// - Optional proxy support
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT);

    // Configure proxy if provided
    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
