//! Torrent upload types.

use std::{any::Any, fs, path::Path, sync::Arc};

use crate::QbitError;

/// Media type declared for torrent file parts unless the caller overrides it.
pub const DEFAULT_TORRENT_CONTENT_TYPE: &str = "application/x-bittorrent";

/// The contents of a torrent file, in one of the representations callers hand over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentBuffer {
    /// Textual content, sent as-is.
    Text(String),
    /// A fixed-length byte buffer.
    Fixed(Box<[u8]>),
    /// A growable byte buffer.
    Growable(Vec<u8>),
    /// A buffer shared with other owners. The encoder copies it rather than holding on to it.
    Shared(Arc<[u8]>),
}

impl TorrentBuffer {
    /// Recover a buffer from a type-erased value.
    ///
    /// Accepted, in order: `String` or `&'static str`, `Box<[u8]>`, `Vec<u8>`, `Arc<[u8]>`.
    /// Anything else fails with [`QbitError::UnsupportedPayload`].
    pub fn from_any(value: Box<dyn Any + Send>) -> Result<Self, QbitError> {
        let value = match value.downcast::<String>() {
            Ok(text) => return Ok(Self::Text(*text)),
            Err(value) => value,
        };
        let value = match value.downcast::<&'static str>() {
            Ok(text) => return Ok(Self::Text((*text).to_string())),
            Err(value) => value,
        };
        let value = match value.downcast::<Box<[u8]>>() {
            Ok(bytes) => return Ok(Self::Fixed(*bytes)),
            Err(value) => value,
        };
        let value = match value.downcast::<Vec<u8>>() {
            Ok(bytes) => return Ok(Self::Growable(*bytes)),
            Err(value) => value,
        };
        match value.downcast::<Arc<[u8]>>() {
            Ok(bytes) => Ok(Self::Shared(*bytes)),
            Err(_) => Err(QbitError::UnsupportedPayload(
                "unsupported buffer type".into(),
            )),
        }
    }

    /// Number of bytes the buffer holds.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Fixed(bytes) => bytes.len(),
            Self::Growable(bytes) => bytes.len(),
            Self::Shared(bytes) => bytes.len(),
        }
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for TorrentBuffer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TorrentBuffer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Box<[u8]>> for TorrentBuffer {
    fn from(value: Box<[u8]>) -> Self {
        Self::Fixed(value)
    }
}

impl<const N: usize> From<[u8; N]> for TorrentBuffer {
    fn from(value: [u8; N]) -> Self {
        Self::Fixed(Box::from(value))
    }
}

impl From<Vec<u8>> for TorrentBuffer {
    fn from(value: Vec<u8>) -> Self {
        Self::Growable(value)
    }
}

impl From<Arc<[u8]>> for TorrentBuffer {
    fn from(value: Arc<[u8]>) -> Self {
        Self::Shared(value)
    }
}

/// A single torrent file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    /// File name reported to the daemon. A name is generated from the position when unset.
    pub filename: Option<String>,
    /// The file contents.
    pub buffer: TorrentBuffer,
    /// Media type of the part.
    pub content_type: String,
}

impl TorrentFile {
    /// A torrent file without a name, declared as [`DEFAULT_TORRENT_CONTENT_TYPE`].
    pub fn new(buffer: impl Into<TorrentBuffer>) -> Self {
        Self {
            filename: None,
            buffer: buffer.into(),
            content_type: DEFAULT_TORRENT_CONTENT_TYPE.to_string(),
        }
    }

    /// Read a torrent file from disk. The file name of `path` becomes the part's filename.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QbitError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            QbitError::FileSystem(format!("failed to read {}: {e}", path.display()))
        })?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);

        Ok(Self {
            filename,
            ..Self::new(bytes)
        })
    }

    /// Set the filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Override the media type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// One or more remote sources (HTTP URLs or magnet links).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    /// A single URL.
    Single(String),
    /// Several URLs.
    Many(Vec<String>),
}

impl UrlSource {
    /// No URL carries any content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(url) => url.is_empty(),
            Self::Many(urls) => urls.iter().all(String::is_empty),
        }
    }

    /// The URLs as one newline-separated value.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(url) => url.clone(),
            Self::Many(urls) => urls.join("\n"),
        }
    }
}

impl From<String> for UrlSource {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for UrlSource {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for UrlSource {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<&str>> for UrlSource {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(str::to_string).collect())
    }
}

/// Parameters of a torrent-add call.
///
/// At least one URL or torrent file is required. Optional fields left at `None` are not
/// sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)] // rationale: named after the torrents/add form fields
pub struct TorrentAddRequest {
    pub urls: Option<UrlSource>,
    pub torrents: Vec<TorrentFile>,
    pub savepath: Option<String>,
    pub category: Option<String>,
    pub paused: Option<bool>,
    pub skip_checking: Option<bool>,
    pub rename: Option<String>,
    /// Upload limit in bytes per second.
    pub up_limit: Option<i64>,
    /// Download limit in bytes per second.
    pub dl_limit: Option<i64>,
}

impl TorrentAddRequest {
    /// A request adding the given URL(s).
    pub fn from_urls(urls: impl Into<UrlSource>) -> Self {
        Self {
            urls: Some(urls.into()),
            ..Default::default()
        }
    }

    /// A request uploading the given torrent files.
    pub fn from_torrents(torrents: Vec<TorrentFile>) -> Self {
        Self {
            torrents,
            ..Default::default()
        }
    }

    /// Whether the request names anything to add.
    pub fn has_sources(&self) -> bool {
        let has_urls = self.urls.as_ref().is_some_and(|urls| !urls.is_empty());
        has_urls || !self.torrents.is_empty()
    }
}
