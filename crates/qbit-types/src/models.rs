//! Response models.
//!
//! Field names follow the qBittorrent Web API. Every field is defaulted, since the daemon
//! omits fields depending on its version and on the torrent's state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The daemon answered with its success sentinel, `Ok.`.
    Success,
    /// The daemon answered with an empty body.
    Empty,
    /// Any other body, parsed as JSON.
    Json(Value),
}

impl ApiResponse {
    /// The response as a JSON value. `Success` maps to `true`, `Empty` to `null`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Success => Value::Bool(true),
            Self::Empty => Value::Null,
            Self::Json(value) => value,
        }
    }

    /// No data came back: an empty body or a JSON `null`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty | Self::Json(Value::Null))
    }
}

/// Torrent information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)] // rationale: these are the same fields as in the Web API
pub struct TorrentInfo {
    pub hash: String,

    pub name: String,

    pub state: String,

    pub category: String,

    pub tags: String,

    pub save_path: String,

    pub size: i64,

    pub total_size: i64,

    pub progress: f64,

    pub dlspeed: i64,

    pub upspeed: i64,

    pub downloaded: i64,

    pub uploaded: i64,

    pub ratio: f64,

    pub eta: i64,

    pub num_seeds: i64,

    pub num_leechs: i64,

    pub priority: i64,

    pub added_on: i64,

    pub completion_on: i64,

    pub dl_limit: i64,

    pub up_limit: i64,

    pub magnet_uri: String,
}

/// Peers of a torrent, keyed by `ip:port`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentPeers {
    /// Whether `peers` is a full listing rather than a delta.
    pub full_update: bool,
    /// Response id.
    pub rid: i64,
    /// Peers by address.
    pub peers: HashMap<String, PeerInfo>,
}

/// A single peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PeerInfo {
    pub ip: String,

    pub port: u16,

    pub client: String,

    pub connection: String,

    pub country: String,

    pub flags: String,

    pub progress: f64,

    pub dl_speed: i64,

    pub up_speed: i64,

    pub downloaded: i64,

    pub uploaded: i64,

    pub relevance: f64,
}

/// Daemon preferences. Settings without a dedicated field are kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Default save path.
    pub save_path: Option<String>,
    /// Path for incomplete torrents.
    pub temp_path: Option<String>,
    /// Global download limit in bytes per second.
    pub dl_limit: Option<i64>,
    /// Global upload limit in bytes per second.
    pub up_limit: Option<i64>,
    /// Maximum number of active downloads.
    pub max_active_downloads: Option<i64>,
    /// Web UI listening port.
    pub web_ui_port: Option<u16>,
    /// Every other setting.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}
