//! Session-level records: settings, statistics and free space.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Peer connection encryption policy.
///
/// Serialized by name. Decoded from either a name or the daemon's numeric code
/// (0 tolerated, 1 preferred, 2 required); anything unrecognised reads as tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "EncryptionWire")]
#[allow(missing_docs)]
pub enum EncryptionMode {
    Required,
    Preferred,
    Tolerated,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EncryptionWire {
    Code(i64),
    Name(String),
}

impl From<EncryptionWire> for EncryptionMode {
    fn from(wire: EncryptionWire) -> Self {
        match wire {
            EncryptionWire::Code(1) => Self::Preferred,
            EncryptionWire::Code(2) => Self::Required,
            EncryptionWire::Code(_) => Self::Tolerated,
            EncryptionWire::Name(name) => match name.to_ascii_lowercase().as_str() {
                "preferred" | "prefer" | "1" => Self::Preferred,
                "required" | "2" => Self::Required,
                _ => Self::Tolerated,
            },
        }
    }
}

/// Session settings as returned by `session-get`.
///
/// The commonly used keys are typed; everything else the daemon reports is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub struct SessionSettings {
    pub version: Option<String>,
    pub rpc_version: Option<i64>,
    pub rpc_version_min: Option<i64>,
    pub download_dir: Option<String>,
    pub incomplete_dir: Option<String>,
    pub incomplete_dir_enabled: Option<bool>,
    pub peer_port: Option<u16>,
    pub peer_limit: Option<i64>,
    pub peer_limit_per_torrent: Option<i64>,
    pub encryption: Option<EncryptionMode>,
    /// KiB/s.
    pub speed_limit_down: Option<u64>,
    pub speed_limit_down_enabled: Option<bool>,
    /// KiB/s.
    pub speed_limit_up: Option<u64>,
    pub speed_limit_up_enabled: Option<bool>,
    pub alt_speed_down: Option<u64>,
    pub alt_speed_up: Option<u64>,
    pub alt_speed_enabled: Option<bool>,
    pub download_queue_size: Option<i64>,
    pub seed_queue_size: Option<i64>,
    pub seed_ratio_limit: Option<f64>,
    pub seed_ratio_limited: Option<bool>,
    pub dht_enabled: Option<bool>,
    pub pex_enabled: Option<bool>,
    pub lpd_enabled: Option<bool>,
    pub utp_enabled: Option<bool>,
    pub blocklist_enabled: Option<bool>,
    pub blocklist_size: Option<i64>,
    /// Keys without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A partial update for `session-set`. Unset fields are not transmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub struct SessionSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_dir_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_limit_per_torrent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<EncryptionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_down: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_up: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dht_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pex_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpd_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocklist_enabled: Option<bool>,
    /// Additional raw keys, sent verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionSettingsPatch {
    /// True when the patch would transmit no keys at all.
    pub fn is_empty(&self) -> bool {
        matches!(serde_json::to_value(self), Ok(Value::Object(map)) if map.is_empty())
    }
}

// The below mirror the daemon's `session-stats` answer.

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SessionStats {
    #[serde(default)]
    pub active_torrent_count: i64,

    #[serde(default)]
    pub cumulative_stats: StatsDetails,

    #[serde(default)]
    pub current_stats: StatsDetails,

    #[serde(default)]
    pub download_speed: i64,

    #[serde(default)]
    pub paused_torrent_count: i64,

    #[serde(default)]
    pub torrent_count: i64,

    #[serde(default)]
    pub upload_speed: i64,
}

/// Detailed statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StatsDetails {
    #[serde(default)]
    pub downloaded_bytes: i64,

    #[serde(default)]
    pub files_added: i64,

    #[serde(default)]
    pub seconds_active: i64,

    #[serde(default)]
    pub session_count: i64,

    #[serde(default)]
    pub uploaded_bytes: i64,
}

/// The answer to `free-space`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSpace {
    /// The path that was queried.
    pub path: String,
    /// Bytes available to the daemon at `path`.
    #[serde(alias = "size-bytes")]
    pub size_bytes: u64,
    /// Capacity of the filesystem holding `path`, when reported.
    #[serde(default, alias = "total_size", skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn settings_keep_unknown_keys() {
        let settings: SessionSettings = serde_json::from_value(json!({
            "download-dir": "/downloads",
            "peer-port": 51413,
            "encryption": "preferred",
            "speed-limit-down": 100,
            "websocket-path": "/ws"
        }))
        .unwrap();
        assert_eq!(settings.download_dir.as_deref(), Some("/downloads"));
        assert_eq!(settings.peer_port, Some(51413));
        assert_eq!(settings.encryption, Some(EncryptionMode::Preferred));
        assert_eq!(settings.extra.get("websocket-path"), Some(&json!("/ws")));
    }

    #[test]
    fn encryption_accepts_codes_and_names() {
        let decode = |value: Value| serde_json::from_value::<EncryptionMode>(value).unwrap();
        assert_eq!(decode(json!(0)), EncryptionMode::Tolerated);
        assert_eq!(decode(json!(1)), EncryptionMode::Preferred);
        assert_eq!(decode(json!(2)), EncryptionMode::Required);
        assert_eq!(decode(json!("preferred")), EncryptionMode::Preferred);
        assert_eq!(decode(json!("Required")), EncryptionMode::Required);
        assert_eq!(decode(json!("tolerated")), EncryptionMode::Tolerated);

        assert_eq!(
            serde_json::to_value(EncryptionMode::Required).unwrap(),
            json!("required")
        );
    }

    #[test]
    fn daemon_session_get_answer_decodes() {
        let settings: SessionSettings = serde_json::from_value(json!({
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
            "encryption": 0,
            "dht-enabled": true,
            "pex-enabled": true,
            "lpd-enabled": false,
            "utp-enabled": true,
            "download-queue-size": 5,
            "seed-queue-size": 10,
            "queue-stalled-enabled": false,
            "incomplete-dir-enabled": false,
            "watch-dir-enabled": false,
            "seed-ratio-limit": 2.0,
            "seed-ratio-limited": false,
            "seed-idle-limit": 30,
            "seed-idle-limited": false,
            "proxy-type": 0,
            "proxy-port": 0,
            "proxy-auth-enabled": false,
            "proxy-password": null,
            "proxy-peer-connections": false,
            "blocklist-enabled": false,
            "blocklist-size": 0,
            "peer-port": 51413,
            "rpc-bind-address": "127.0.0.1",
            "rpc-port": 9091
        }))
        .unwrap();

        assert_eq!(settings.version.as_deref(), Some("TinyTorrent 0.1.0"));
        assert_eq!(settings.encryption, Some(EncryptionMode::Tolerated));
        assert_eq!(settings.seed_ratio_limit, Some(2.0));
        assert_eq!(settings.peer_port, Some(51413));
        assert_eq!(settings.extra.get("proxy-password"), Some(&Value::Null));
        assert_eq!(settings.extra.get("rpc-port"), Some(&json!(9091)));
    }

    #[test]
    fn capabilities_answer_decodes() {
        let settings: SessionSettings = serde_json::from_value(json!({
            "server-version": "TinyTorrent 1.0.0",
            "version": "TinyTorrent 1.0.0",
            "rpc-version": 17,
            "rpc-version-min": 1,
            "websocket-endpoint": "/ws",
            "websocket-path": "/ws",
            "platform": "win32",
            "features": ["fs-browse", "sequential-download", "labels"]
        }))
        .unwrap();

        assert_eq!(settings.rpc_version_min, Some(1));
        assert_eq!(
            settings.extra.get("features"),
            Some(&json!(["fs-browse", "sequential-download", "labels"]))
        );
    }

    #[test]
    fn patch_sends_only_provided_keys() {
        let patch = SessionSettingsPatch {
            speed_limit_up: Some(250),
            speed_limit_up_enabled: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"speed-limit-up": 250, "speed-limit-up-enabled": true})
        );
        assert!(!patch.is_empty());
        assert!(SessionSettingsPatch::default().is_empty());
    }

    #[test]
    fn free_space_total_is_optional() {
        let space: FreeSpace =
            serde_json::from_value(json!({"path": "/data", "sizeBytes": 1024})).unwrap();
        assert_eq!(space.size_bytes, 1024);
        assert_eq!(space.total_size, None);
    }
}
