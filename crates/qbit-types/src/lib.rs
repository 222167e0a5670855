//! # qBittorrent Types
//!
//! This crate defines the configuration, request, response and error types shared by
//! qBittorrent Web API clients, together with the [`QBittorrent`] trait they implement.

use thiserror::Error;

mod config;
mod models;
mod query;
mod torrent;

pub use config::ClientConfig;
pub use models::{ApiResponse, PeerInfo, Preferences, TorrentInfo, TorrentPeers};
pub use query::{HashSelector, TorrentFilter, TorrentInfoQuery};
pub use torrent::{
    DEFAULT_TORRENT_CONTENT_TYPE, TorrentAddRequest, TorrentBuffer, TorrentFile, UrlSource,
};

/// Error type for qBittorrent operations.
#[derive(Error, Debug)]
pub enum QbitError {
    /// Malformed caller input. Never reaches the network.
    #[error("validation error: {0}")]
    Validation(String),

    /// A torrent buffer was supplied in a representation the encoder can't handle.
    #[error("unsupported payload: {0}")]
    UnsupportedPayload(String),

    /// Login was rejected, or no session identifier came back.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failures (connection refused, timeouts, TLS, etc.)
    #[error("request failed: {0}")]
    Request(String),

    /// The daemon answered, but not with what the call requires.
    #[error("unexpected response: {0}")]
    Response(String),

    /// Malformed JSON, or JSON that does not match the expected model.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// File system errors (file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),
}

impl From<serde_json::Error> for QbitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// QBittorrent defines the operations a qBittorrent Web API client offers.
///
/// Every call except [`QBittorrent::login`] logs in on demand when credentials are
/// configured and no session is held yet.
#[allow(async_fn_in_trait)]
pub trait QBittorrent {
    /// Authenticate with the configured credentials and keep the session identifier.
    async fn login(&self) -> Result<(), QbitError>;
    /// End the session. The held session identifier is dropped even if the call fails.
    async fn logout(&self) -> Result<(), QbitError>;
    /// Version string reported by the daemon.
    async fn api_version(&self) -> Result<String, QbitError>;
    /// Daemon preferences.
    async fn preferences(&self) -> Result<Preferences, QbitError>;
    /// List torrents, optionally filtered.
    async fn torrents(
        &self,
        query: Option<&TorrentInfoQuery>,
    ) -> Result<Vec<TorrentInfo>, QbitError>;
    /// Add torrents from URLs and/or torrent file contents.
    async fn add(&self, request: TorrentAddRequest) -> Result<(), QbitError>;
    /// Pause the selected torrents.
    async fn pause(&self, hashes: HashSelector) -> Result<(), QbitError>;
    /// Resume the selected torrents.
    async fn resume(&self, hashes: HashSelector) -> Result<(), QbitError>;
    /// Delete the selected torrents. If `delete_files` is true, downloaded data is removed too.
    async fn delete(&self, hashes: HashSelector, delete_files: bool) -> Result<(), QbitError>;
    /// Move the selected torrents into `category`.
    async fn set_category(&self, hashes: HashSelector, category: &str) -> Result<(), QbitError>;
    /// Peers of a single torrent.
    async fn peers(&self, hash: &str) -> Result<TorrentPeers, QbitError>;
}
