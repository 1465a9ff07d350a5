//! Shared test utilities and fixtures.

use serde_json::{Value, json};

use tinytorrent_types::{RESULT_SUCCESS, RpcResponse, TorrentId};

/// A successful response envelope carrying `arguments`.
pub(crate) fn success(arguments: Value) -> RpcResponse {
    RpcResponse {
        result: RESULT_SUCCESS.to_string(),
        arguments,
        tag: None,
    }
}

/// A daemon-level failure as the daemon serializes it.
pub(crate) fn failure(message: &str) -> RpcResponse {
    RpcResponse {
        result: "error".to_string(),
        arguments: json!({ "message": message }),
        tag: None,
    }
}

pub(crate) fn summary_json(id: TorrentId, name: &str) -> Value {
    json!({
        "id": id,
        "hashString": format!("{id:040x}"),
        "name": name,
        "totalSize": 1000,
        "percentDone": 0.5,
        "status": 4,
        "rateDownload": 2048,
        "rateUpload": 512,
        "peersConnected": 5,
        "peersSendingToUs": 3,
        "peersGettingFromUs": 2,
        "eta": 120,
        "addedDate": 1_700_000_000,
        "queuePosition": 0,
        "uploadRatio": 0.1,
        "uploadedEver": 50,
        "downloadedEver": 500,
        "downloadDir": "/downloads",
        "leftUntilDone": 500,
        "sizeWhenDone": 1000,
        "error": 0,
        "errorString": "",
        "sequentialDownload": false,
        "superSeeding": false,
        "isFinished": false,
        "labels": [],
        "bandwidthPriority": 0
    })
}

pub(crate) fn detail_json(id: TorrentId, name: &str) -> Value {
    let mut detail = summary_json(id, name);
    if let Value::Object(map) = &mut detail {
        map.insert(
            "files".into(),
            json!([
                {"index": 0, "name": format!("{name}/a.bin"), "length": 600, "bytesCompleted": 300,
                 "progress": 0.5, "priority": 0, "wanted": true},
                {"index": 1, "name": format!("{name}/b.bin"), "length": 400, "bytesCompleted": 200,
                 "progress": 0.5, "priority": 0, "wanted": false}
            ]),
        );
        map.insert(
            "trackers".into(),
            json!([{"announce": "udp://tracker.example:6969/announce", "tier": 0}]),
        );
        map.insert(
            "peers".into(),
            json!([{"address": "10.0.0.7:51413", "clientName": "TinyTorrent 1.0",
                    "clientIsChoking": false, "clientIsInterested": true,
                    "peerIsChoking": false, "peerIsInterested": true,
                    "rateToClient": 1024, "rateToPeer": 0, "progress": 0.9, "flagStr": "DE"}]),
        );
        map.insert("pieceCount".into(), json!(4));
        map.insert("pieceSize".into(), json!(262_144));
        map.insert("pieceStates".into(), json!([1, 1, 0, 0]));
        map.insert("pieceAvailability".into(), json!([3, 2, 1, 0]));
    }
    detail
}

/// `session-get` as the daemon answers it.
pub(crate) fn settings_json() -> Value {
    json!({
        "version": "TinyTorrent 0.1.0",
        "rpc-version": 17,
        "rpc-version-min": 1,
        "download-dir": "/downloads",
        "speed-limit-down": 0,
        "speed-limit-down-enabled": false,
        "speed-limit-up": 0,
        "speed-limit-up-enabled": false,
        "peer-limit": 200,
        "peer-limit-per-torrent": 50,
        "alt-speed-down": 50,
        "alt-speed-up": 50,
        "alt-speed-enabled": false,
        "alt-speed-time-enabled": false,
        "alt-speed-time-begin": 540,
        "alt-speed-time-end": 1020,
        "alt-speed-time-day": 127,
        "encryption": 1,
        "dht-enabled": true,
        "pex-enabled": true,
        "lpd-enabled": false,
        "utp-enabled": true,
        "download-queue-size": 5,
        "seed-queue-size": 10,
        "queue-stalled-enabled": false,
        "incomplete-dir": "/downloads/.incomplete",
        "incomplete-dir-enabled": true,
        "watch-dir": "",
        "watch-dir-enabled": false,
        "seed-ratio-limit": 1.5,
        "seed-ratio-limited": true,
        "seed-idle-limit": 30,
        "seed-idle-limited": false,
        "proxy-type": 0,
        "proxy-host": "",
        "proxy-port": 0,
        "proxy-auth-enabled": false,
        "proxy-username": "",
        "proxy-password": null,
        "proxy-peer-connections": false,
        "blocklist-enabled": false,
        "blocklist-size": 0,
        "peer-port": 51413,
        "rpc-bind-address": "0.0.0.0",
        "rpc-port": 9091
    })
}

pub(crate) fn stats_json() -> Value {
    json!({
        "activeTorrentCount": 1,
        "pausedTorrentCount": 0,
        "torrentCount": 1,
        "downloadSpeed": 1000,
        "uploadSpeed": 500,
        "cumulativeStats": {
            "downloadedBytes": 1000,
            "uploadedBytes": 500,
            "filesAdded": 5,
            "sessionCount": 10,
            "secondsActive": 3600
        },
        "currentStats": {
            "downloadedBytes": 100,
            "uploadedBytes": 50,
            "filesAdded": 1,
            "sessionCount": 1,
            "secondsActive": 600
        }
    })
}
