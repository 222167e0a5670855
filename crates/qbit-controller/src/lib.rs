//! # Torrent controller using the qBittorrent Web API.
//!
//! usage:
//!
//! ```rust,ignore
//! use qbit_controller::QbitClient;
//! use qbit_types::{ClientConfig, QBittorrent, TorrentAddRequest, TorrentFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QbitClient::try_new(ClientConfig::from_env())?;
//!     println!("Web API {}", client.api_version().await?);
//!
//!     let request = TorrentAddRequest {
//!         category: Some("linux".into()),
//!         ..TorrentAddRequest::from_torrents(vec![TorrentFile::from_path("debian.torrent")?])
//!     };
//!     client.add(request).await?;
//!
//!     for torrent in client.torrents(None).await? {
//!         println!("{} {:.1}%", torrent.name, torrent.progress * 100.0);
//!     }
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
//!

mod client;
mod conversions;
mod ops;
mod payload;
mod response;
#[cfg(test)]
mod testutil;

pub use client::QbitClient;

#[cfg(test)]
use {dotenvy as _, httpmock as _, tempfile as _, test_log as _, tracing_subscriber as _};
