//! qBittorrent Web API client implementation.

use qbit_types::{
    ApiResponse, ClientConfig, HashSelector, Preferences, QBittorrent, QbitError,
    TorrentAddRequest, TorrentInfo, TorrentInfoQuery, TorrentPeers,
};
use reqwest::{Client, Method};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::conversions::{expect_success, into_model, require_model};
use crate::ops::{ApiRequest, HttpOps, RawResponse, RequestBody, TransportError};
use crate::payload;
use crate::response::{LOGIN_FAILURE_SENTINEL, decode, extract_sid};


/// Status the daemon answers with when a request lacks a valid session.
const STATUS_FORBIDDEN: u16 = 403;

/// QbitClient talks to a qBittorrent daemon through its Web API.
///
/// The session identifier is obtained lazily: the first call made without a session
/// logs in, provided both username and password are configured.
#[allow(missing_debug_implementations, private_bounds)]
pub struct QbitClient<T: HttpOps = Client> {
    client: T,
    config: ClientConfig,
    api_base: Url,
    session: Mutex<Option<String>>,
}

impl QbitClient {
    /// Create a new QbitClient with a default HTTP client.
    ///
    /// No request is made until the first call.
    pub fn try_new(config: ClientConfig) -> Result<Self, QbitError> {
        Self::with_http_client(config, Client::new())
    }

    /// Create a new QbitClient on top of a configured `reqwest` client, e.g. one with
    /// timeouts or a custom TLS setup.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self, QbitError> {
        Self::with_client(config, client)
    }
}

#[allow(private_bounds)]
impl<T: HttpOps> QbitClient<T> {
    pub(crate) fn with_client(config: ClientConfig, client: T) -> Result<Self, QbitError> {
        let api_base = Url::parse(&format!("{}/api/v2/", config.base_url()))
            .map_err(|e| QbitError::Config(format!("Invalid base URL: {e}")))?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(QbitError::Config(format!(
                "Invalid base URL: unsupported scheme {}",
                api_base.scheme()
            )));
        }

        debug!("Using qBittorrent Web API at {}", api_base);
        Ok(Self {
            client,
            config,
            api_base,
            session: Mutex::new(None),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The session identifier currently held, if any.
    pub async fn session_id(&self) -> Option<String> {
        self.session.lock().await.clone()
    }

    /// Drop the held session identifier without telling the daemon.
    /// The next call logs in again when credentials are configured.
    pub async fn invalidate_session(&self) {
        *self.session.lock().await = None;
    }

    /// Clears the session only if it is still the one `rejected` names; a concurrent
    /// login may already have replaced it.
    async fn drop_rejected_session(&self, rejected: Option<&str>) {
        let mut session = self.session.lock().await;
        if session.as_deref() == rejected {
            *session = None;
        } else {
            debug!("Keeping session obtained after the rejected request");
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, QbitError> {
        self.api_base
            .join(endpoint)
            .map_err(|e| QbitError::Config(format!("Invalid endpoint {endpoint}: {e}")))
    }

    /// Returns the session to use, logging in first if there is none and credentials
    /// are configured. The lock is held across the login so concurrent callers wait for
    /// a single login instead of racing their own.
    async fn ensure_session(&self) -> Result<Option<String>, QbitError> {
        let mut session = self.session.lock().await;
        if session.is_none() && self.config.has_credentials() {
            *session = Some(self.authenticate().await?);
        }
        Ok(session.clone())
    }

    /// POSTs the credentials and returns the session identifier. Leaves the session
    /// slot alone; callers hold its lock.
    async fn authenticate(&self) -> Result<String, QbitError> {
        let (Some(username), Some(password)) = (self.config.username(), self.config.password())
        else {
            return Err(QbitError::Authentication("missing credentials".into()));
        };

        debug!("Logging in as {username}");
        let request = ApiRequest {
            method: Method::POST,
            url: self.endpoint_url("auth/login")?,
            cookie: None,
            body: RequestBody::Form(vec![
                ("username".into(), username.into()),
                ("password".into(), password.into()),
            ]),
        };
        let response = self
            .client
            .execute(request)
            .await
            .map_err(map_transport_error)?;

        if response.body == LOGIN_FAILURE_SENTINEL {
            return Err(QbitError::Authentication(
                "invalid username or password".into(),
            ));
        }

        match extract_sid(&response.set_cookie) {
            Some(sid) => {
                debug!("Logged in");
                Ok(sid)
            }
            None => {
                warn!(
                    status = response.status,
                    "failed to extract session identifier from login response"
                );
                Err(QbitError::Authentication(
                    "failed to extract session identifier".into(),
                ))
            }
        }
    }

    /// Sends a request to `endpoint` and returns the raw response.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<RawResponse, QbitError> {
        let sid = self.ensure_session().await?;

        let mut url = self.endpoint_url(endpoint)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        debug!("{method} {endpoint}");
        let request = ApiRequest {
            method,
            url,
            cookie: sid.as_ref().map(|sid| format!("SID={sid}")),
            body,
        };
        let response = self
            .client
            .execute(request)
            .await
            .map_err(map_transport_error)?;
        debug!("{endpoint} answered with status {}", response.status);

        if response.status == STATUS_FORBIDDEN {
            self.drop_rejected_session(sid.as_deref()).await;
            return Err(QbitError::Authentication(format!(
                "{endpoint} rejected the request: session missing or expired"
            )));
        }

        Ok(response)
    }

    /// Sends a request to `endpoint` and decodes the response body.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<ApiResponse, QbitError> {
        let response = self.send(method, endpoint, query, body).await?;
        decode(&response.body)
    }

    async fn command(&self, endpoint: &str, fields: &[(&str, String)]) -> Result<(), QbitError> {
        let fields = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        let response = self
            .request(Method::POST, endpoint, &[], RequestBody::Form(fields))
            .await?;
        expect_success(response, endpoint)
    }
}

#[allow(private_bounds)]
impl<T: HttpOps> QBittorrent for QbitClient<T> {
    async fn login(&self) -> Result<(), QbitError> {
        let mut session = self.session.lock().await;
        *session = None;
        *session = Some(self.authenticate().await?);
        Ok(())
    }

    async fn logout(&self) -> Result<(), QbitError> {
        debug!("Logging out");
        let result = self
            .request(Method::POST, "auth/logout", &[], RequestBody::Empty)
            .await;
        self.invalidate_session().await;
        debug!("Session cleared");

        expect_success(result?, "logout")
    }

    async fn api_version(&self) -> Result<String, QbitError> {
        // Plain text, not JSON.
        let response = self
            .send(Method::GET, "app/version", &[], RequestBody::Empty)
            .await?;
        let version = response.body.trim();
        if version.is_empty() {
            return Err(QbitError::Response("no version returned".into()));
        }

        debug!("API version: {version}");
        Ok(version.to_string())
    }

    async fn preferences(&self) -> Result<Preferences, QbitError> {
        debug!("Getting preferences");
        let response = self
            .request(Method::GET, "app/preferences", &[], RequestBody::Empty)
            .await?;
        require_model(response, "preferences")
    }

    async fn torrents(
        &self,
        query: Option<&TorrentInfoQuery>,
    ) -> Result<Vec<TorrentInfo>, QbitError> {
        debug!("Listing torrents, query={query:?}");
        let pairs = query
            .map(TorrentInfoQuery::to_query_pairs)
            .unwrap_or_default();
        let response = self
            .request(Method::GET, "torrents/info", &pairs, RequestBody::Empty)
            .await?;
        let torrents: Vec<TorrentInfo> = into_model(response)?;
        debug!("Listed {} torrents", torrents.len());

        Ok(torrents)
    }

    async fn add(&self, request: TorrentAddRequest) -> Result<(), QbitError> {
        debug!(
            "Adding torrents: urls={:?}, files={}",
            request.urls,
            request.torrents.len()
        );
        let form = payload::encode(request)?;
        let response = self
            .request(
                Method::POST,
                "torrents/add",
                &[],
                RequestBody::Multipart(form),
            )
            .await?;

        match response {
            ApiResponse::Success => {
                debug!("Torrents added");
                Ok(())
            }
            other => Err(QbitError::Response(format!(
                "torrent was not added: {other:?}"
            ))),
        }
    }

    async fn pause(&self, hashes: HashSelector) -> Result<(), QbitError> {
        debug!("Pausing torrents {hashes:?}");
        self.command("torrents/pause", &[("hashes", hashes.joined())])
            .await
    }

    async fn resume(&self, hashes: HashSelector) -> Result<(), QbitError> {
        debug!("Resuming torrents {hashes:?}");
        self.command("torrents/resume", &[("hashes", hashes.joined())])
            .await
    }

    async fn delete(&self, hashes: HashSelector, delete_files: bool) -> Result<(), QbitError> {
        debug!("Deleting torrents {hashes:?}, delete_files={delete_files}");
        self.command(
            "torrents/delete",
            &[
                ("hashes", hashes.joined()),
                ("deleteFiles", delete_files.to_string()),
            ],
        )
        .await
    }

    async fn set_category(&self, hashes: HashSelector, category: &str) -> Result<(), QbitError> {
        debug!("Setting category {category:?} on torrents {hashes:?}");
        self.command(
            "torrents/setCategory",
            &[
                ("hashes", hashes.joined()),
                ("category", category.to_string()),
            ],
        )
        .await
    }

    async fn peers(&self, hash: &str) -> Result<TorrentPeers, QbitError> {
        debug!("Getting peers for torrent {hash}");
        let response = self
            .request(
                Method::GET,
                "torrents/peers",
                &[("hash", hash.to_string())],
                RequestBody::Empty,
            )
            .await?;
        let peers: TorrentPeers = require_model(response, "peers")?;
        debug!("Torrent {hash} has {} peers", peers.peers.len());

        Ok(peers)
    }
}

/// Maps transport errors to qBittorrent errors.
fn map_transport_error(err: TransportError) -> QbitError {
    QbitError::Request(err.0)
}
