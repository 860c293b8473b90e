//! Configuration structure for a chunk downloader.
//!
//! [`DownloaderConfig`] gathers what a [`ChunkDownloader`](super::ChunkDownloader)
//! needs: the correlation identifier, the request descriptor and the HTTP
//! client options. It is filled by
//! [`ChunkDownloaderBuilder`](super::ChunkDownloaderBuilder).

use crate::chunk::{CallbackId, ChunkRequest};
use crate::http::HttpClientConfig;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Identifier passed back with every callback.
    pub id: CallbackId,
    /// What to download.
    pub request: ChunkRequest,
    /// HTTP client options.
    pub http: HttpClientConfig,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("id", &self.id)
            .field("url", &self.request.url)
            .field("range", &self.request.range)
            .field("expected_total_size", &self.request.expected_total_size)
            .field("body_len", &self.request.body.len())
            .field("user_agent", &self.request.user_agent)
            .field("proxy", &self.http.proxy.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            id: CallbackId::default(),
            request: ChunkRequest::new(String::new()),
            http: HttpClientConfig::default(),
        }
    }
}
