//! Chained flow against a running qBittorrent daemon: add -> list -> peers -> pause ->
//! resume -> set category -> delete.
//! Requires a reachable Web API and environment configuration (a `.env` file works):
//! - QBITTORRENT_URL (default: http://localhost:8080)
//! - QBITTORRENT_USERNAME
//! - QBITTORRENT_PASSWORD
//!
//! Run with `--ignored`.

#![allow(unused_crate_dependencies)]
#![allow(missing_docs)]

use std::time::Duration;

use qbit_controller::QbitClient;
use qbit_types::{ClientConfig, QBittorrent, TorrentAddRequest, TorrentInfo};
use tokio::time::sleep;

const HASH: &str = "5f3a1c7e9b2d4f6a8c0e1b3d5f7a9c2e4b6d8f0a";

async fn find_torrent(client: &QbitClient) -> Option<TorrentInfo> {
    for _ in 0..20 {
        let list = client
            .torrents(None)
            .await
            .expect("failed to list torrents");
        if let Some(torrent) = list.into_iter().find(|t| t.hash == HASH) {
            return Some(torrent);
        }
        sleep(Duration::from_millis(250)).await;
    }
    None
}

#[test_log::test(tokio::test)]
#[ignore = "requires a running qBittorrent daemon"]
async fn qbittorrent_chained_flow() {
    let _ = dotenvy::dotenv();
    let client = QbitClient::try_new(ClientConfig::from_env())
        .expect("failed to initialize QbitClient");

    let version = client.api_version().await.expect("failed to get version");
    assert!(!version.is_empty());

    let download_dir = tempfile::tempdir().expect("failed to create download dir");

    // 1. Add a paused magnet
    let request = TorrentAddRequest {
        savepath: Some(download_dir.path().to_string_lossy().into_owned()),
        paused: Some(true),
        ..TorrentAddRequest::from_urls(format!(
            "magnet:?xt=urn:btih:{HASH}&dn=qbit-controller-test"
        ))
    };
    client.add(request).await.expect("failed to add torrent");

    // 2. It shows up in the list
    let torrent = find_torrent(&client)
        .await
        .expect("added torrent not found in list");
    assert_eq!(torrent.hash, HASH);

    // 3. Peers for our torrent
    let _peers = client.peers(HASH).await.expect("failed to fetch peers");

    // 4. Pause, resume, categorize
    client.pause(HASH.into()).await.expect("failed to pause");
    client.resume(HASH.into()).await.expect("failed to resume");
    client
        .set_category(HASH.into(), "")
        .await
        .expect("failed to clear category");

    // 5. Delete, keeping no data
    client
        .delete(HASH.into(), true)
        .await
        .expect("failed to delete torrent");
    sleep(Duration::from_millis(500)).await;
    let still_present = client
        .torrents(None)
        .await
        .expect("failed to list torrents")
        .iter()
        .any(|t| t.hash == HASH);
    assert!(!still_present, "torrent was not removed");

    client.logout().await.expect("failed to log out");
    assert_eq!(client.session_id().await, None);
}
