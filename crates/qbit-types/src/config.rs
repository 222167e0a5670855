//! Client configuration.

use std::{env, fmt};

/// Base URL used by [`ClientConfig::from_env`] when `QBITTORRENT_URL` is unset.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for a qBittorrent Web API client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ClientConfig {
    /// Create a configuration. A trailing slash on `base_url` is stripped.
    pub fn new(
        base_url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            username,
            password,
        }
    }

    /// Create a configuration without credentials, for daemons that bypass authentication.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self::new(base_url, None, None)
    }

    /// Reads `QBITTORRENT_URL`, `QBITTORRENT_USERNAME` and `QBITTORRENT_PASSWORD`.
    /// Empty variables are treated as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());
        Self::new(
            var("QBITTORRENT_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            var("QBITTORRENT_USERNAME"),
            var("QBITTORRENT_PASSWORD"),
        )
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The configured password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Both username and password are configured.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        write!(
            f,
            "ClientConfig(base_url=\"{}\", username={:?}, password=<{}>)",
            self.base_url,
            self.username,
            if self.password.is_some() {
                "set"
            } else {
                "unset"
            },
        )
    }
}
