//! Shared test utilities and fixtures.

use qbit_types::ClientConfig;
use serde_json::{Value, json};

use crate::ops::{ApiRequest, RawResponse, RequestBody};

pub(crate) const TEST_SID: &str = "Jx8Zq1rA9bC";

pub(crate) fn test_config() -> ClientConfig {
    ClientConfig::new(
        "http://localhost:8080/",
        Some("admin".into()),
        Some("adminadmin".into()),
    )
}

pub(crate) fn raw(body: &str) -> RawResponse {
    RawResponse {
        status: 200,
        set_cookie: Vec::new(),
        body: body.to_string(),
    }
}

pub(crate) fn login_ok(sid: &str) -> RawResponse {
    RawResponse {
        set_cookie: vec![format!("SID={sid}; HttpOnly; SameSite=Strict; path=/")],
        ..raw("Ok.")
    }
}

pub(crate) fn is_endpoint(request: &ApiRequest, endpoint: &str) -> bool {
    request.url.path() == format!("/api/v2/{endpoint}")
}

pub(crate) fn form_value<'a>(request: &'a ApiRequest, name: &str) -> Option<&'a str> {
    match &request.body {
        RequestBody::Form(fields) => fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str()),
        _ => None,
    }
}

pub(crate) fn query_pairs(request: &ApiRequest) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

pub(crate) fn make_test_torrent(hash: &str, name: &str) -> Value {
    json!({
        "hash": hash,
        "name": name,
        "state": "downloading",
        "category": "",
        "tags": "",
        "save_path": "/downloads",
        "size": 1000,
        "total_size": 1000,
        "progress": 0.5,
        "dlspeed": 2048,
        "upspeed": 512,
        "downloaded": 500,
        "uploaded": 100,
        "ratio": 0.2,
        "eta": 60,
        "num_seeds": 3,
        "num_leechs": 1,
        "priority": 1,
        "added_on": 1_700_000_000,
        "completion_on": -1,
        "dl_limit": 0,
        "up_limit": 0,
        "magnet_uri": format!("magnet:?xt=urn:btih:{hash}")
    })
}

pub(crate) fn make_test_peers() -> Value {
    json!({
        "full_update": true,
        "rid": 1,
        "peers": {
            "10.0.0.2:6881": {
                "ip": "10.0.0.2",
                "port": 6881,
                "client": "qBittorrent/4.6.0",
                "connection": "BT",
                "progress": 1.0,
                "dl_speed": 0,
                "up_speed": 1024
            },
            "10.0.0.3:51413": {
                "ip": "10.0.0.3",
                "port": 51413,
                "client": "Transmission 4.0.5",
                "connection": "μTP",
                "progress": 0.3,
                "dl_speed": 4096,
                "up_speed": 0
            }
        }
    })
}
