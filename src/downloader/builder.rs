//! Builder pattern implementation for creating ChunkDownloader instances.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::chunk::{ByteRange, CallbackId};
//! use rangefetch::downloader::ChunkDownloaderBuilder;
//!
//! let downloader = ChunkDownloaderBuilder::new("https://example.com/planet.mwm")
//!     .id(CallbackId(17))
//!     .range(ByteRange::new(0, Some(1_048_575)))
//!     .expected_total_size(8_388_608)
//!     .user_agent("MapsDownloader/1.0")
//!     .build();
//! assert_eq!(downloader.id(), CallbackId(17));
//! ```

use super::{config::DownloaderConfig, downloader::ChunkDownloader};
use crate::chunk::{ByteRange, CallbackId};

use reqwest::Proxy;

/// A builder used to create a [`ChunkDownloader`].
#[derive(Debug, Default)]
pub struct ChunkDownloaderBuilder {
    config: DownloaderConfig,
}

impl ChunkDownloaderBuilder {
    /// Creates a builder downloading the whole resource at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let mut builder = ChunkDownloaderBuilder::default();
        builder.config.request.url = url.into();
        builder
    }

    /// Sets the correlation identifier passed back with every callback.
    pub fn id(mut self, id: CallbackId) -> Self {
        self.config.id = id;
        self
    }

    /// Sets the byte range to download.
    pub fn range(mut self, range: ByteRange) -> Self {
        self.config.request.range = range;
        self
    }

    /// Sets the expected size of the whole resource.
    ///
    /// Only used to size progress bars.
    pub fn expected_total_size(mut self, size: u64) -> Self {
        self.config.request.expected_total_size = Some(size);
        self
    }

    /// Sets a request body. A non-empty body turns the request into a `POST`.
    pub fn post_body(mut self, body: impl Into<String>) -> Self {
        self.config.request.body = body.into();
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.request.user_agent = user_agent.into();
        self
    }

    /// Routes the request through a proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Create the [`ChunkDownloader`] with the specified options.
    pub fn build(self) -> ChunkDownloader {
        ChunkDownloader::from_config(self.config)
    }
}
