//! Torrent listing filters and hash selectors.

use std::fmt;

/// State filter accepted by the torrent listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TorrentFilter {
    All,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Active,
    Inactive,
}

impl TorrentFilter {
    /// The value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Downloading => "downloading",
            Self::Seeding => "seeding",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for TorrentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects torrents by hash: one hash, or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashSelector {
    /// A single torrent hash, or the literal `all`.
    Single(String),
    /// Several torrent hashes.
    Many(Vec<String>),
}

impl HashSelector {
    /// Selector matching every torrent.
    pub fn all() -> Self {
        Self::Single("all".into())
    }

    /// The hashes as one `|`-separated value.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(hash) => hash.clone(),
            Self::Many(hashes) => hashes.join("|"),
        }
    }
}

impl From<&str> for HashSelector {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for HashSelector {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for HashSelector {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<&str>> for HashSelector {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(str::to_string).collect())
    }
}

/// Filters for the torrent listing. Fields left at `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorrentInfoQuery {
    /// Torrent state filter.
    pub filter: Option<TorrentFilter>,
    /// Only torrents in this category.
    pub category: Option<String>,
    /// Field to sort by.
    pub sort: Option<String>,
    /// Reverse the sort order.
    pub reverse: Option<bool>,
    /// Maximum number of torrents returned.
    pub limit: Option<u32>,
    /// Offset into the result list. Negative values count from the end.
    pub offset: Option<i64>,
    /// Only torrents with these hashes.
    pub hashes: Option<HashSelector>,
}

impl TorrentInfoQuery {
    /// Query parameters for the fields that are set.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = self.filter {
            pairs.push(("filter", filter.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(reverse) = self.reverse {
            pairs.push(("reverse", reverse.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(hashes) = &self.hashes {
            pairs.push(("hashes", hashes.joined()));
        }
        pairs
    }
}
