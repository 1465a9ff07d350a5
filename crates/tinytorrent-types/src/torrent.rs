//! Torrent records returned by `torrent-get`, `torrent-add` and `torrent-rename-path`.

use serde::{Deserialize, Serialize};

/// Numeric torrent identifier assigned by the daemon.
pub type TorrentId = i64;

/// Torrent activity state, as reported in the numeric `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TorrentStatus {
    #[default]
    #[allow(missing_docs)]
    Stopped,
    #[allow(missing_docs)]
    CheckWait,
    #[allow(missing_docs)]
    Check,
    #[allow(missing_docs)]
    DownloadWait,
    #[allow(missing_docs)]
    Download,
    #[allow(missing_docs)]
    SeedWait,
    #[allow(missing_docs)]
    Seed,
    /// A status code this client does not know about.
    Unknown(i64),
}

impl From<i64> for TorrentStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Stopped,
            1 => Self::CheckWait,
            2 => Self::Check,
            3 => Self::DownloadWait,
            4 => Self::Download,
            5 => Self::SeedWait,
            6 => Self::Seed,
            other => Self::Unknown(other),
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::CheckWait => 1,
            TorrentStatus::Check => 2,
            TorrentStatus::DownloadWait => 3,
            TorrentStatus::Download => 4,
            TorrentStatus::SeedWait => 5,
            TorrentStatus::Seed => 6,
            TorrentStatus::Unknown(code) => code,
        }
    }
}

// Field names follow the daemon's camelCase spelling. `id`, `hashString` and `name` are
// required; everything else defaults when the daemon omits it.

/// Torrent summary, as returned for the list projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentSummary {
    pub id: TorrentId,

    pub hash_string: String,

    pub name: String,

    #[serde(default)]
    pub total_size: i64,

    /// Completion in the range `0.0..=1.0`.
    #[serde(default)]
    pub percent_done: f64,

    #[serde(default)]
    pub status: TorrentStatus,

    /// Bytes per second.
    #[serde(default)]
    pub rate_download: u64,

    /// Bytes per second.
    #[serde(default)]
    pub rate_upload: u64,

    #[serde(default)]
    pub peers_connected: i64,

    #[serde(default)]
    pub peers_sending_to_us: i64,

    #[serde(default)]
    pub peers_getting_from_us: i64,

    /// Seconds until done; negative values mean unknown or not applicable.
    #[serde(default)]
    pub eta: i64,

    #[serde(default)]
    pub added_date: i64,

    #[serde(default)]
    pub queue_position: i64,

    #[serde(default)]
    pub upload_ratio: f64,

    #[serde(default)]
    pub uploaded_ever: i64,

    #[serde(default)]
    pub downloaded_ever: i64,

    #[serde(default)]
    pub download_dir: String,

    #[serde(default)]
    pub left_until_done: i64,

    #[serde(default)]
    pub size_when_done: i64,

    #[serde(default)]
    pub error: i64,

    #[serde(default)]
    pub error_string: String,

    #[serde(default)]
    pub sequential_download: bool,

    #[serde(default)]
    pub super_seeding: bool,

    #[serde(default)]
    pub is_finished: bool,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub bandwidth_priority: i64,
}

/// Torrent detail: the summary plus files, trackers, peers and piece state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentDetail {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: TorrentSummary,

    /// Files of the torrent, in metainfo order.
    #[serde(default)]
    pub files: Vec<TorrentFile>,

    /// Announce URLs with their tiers.
    #[serde(default)]
    pub trackers: Vec<TrackerEntry>,

    /// Currently connected peers.
    #[serde(default)]
    pub peers: Vec<PeerEntry>,

    /// Number of pieces.
    #[serde(default)]
    pub piece_count: u64,

    /// Piece size in bytes.
    #[serde(default)]
    pub piece_size: u64,

    /// Per-piece download state.
    #[serde(default)]
    pub piece_states: Vec<u32>,

    /// Per-piece count of peers that have the piece.
    #[serde(default)]
    pub piece_availability: Vec<u32>,
}

/// One file inside a torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub index: u32,

    pub name: String,

    #[serde(default)]
    pub length: u64,

    #[serde(default)]
    pub bytes_completed: u64,

    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub priority: i64,

    #[serde(default = "default_wanted")]
    pub wanted: bool,
}

fn default_wanted() -> bool {
    true
}

/// A tracker announce URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct TrackerEntry {
    pub announce: String,

    #[serde(default)]
    pub tier: i64,
}

/// A connected peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeerEntry {
    pub address: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub client_is_choking: bool,

    #[serde(default)]
    pub client_is_interested: bool,

    #[serde(default)]
    pub peer_is_choking: bool,

    #[serde(default)]
    pub peer_is_interested: bool,

    #[serde(default)]
    pub rate_to_client: u64,

    #[serde(default)]
    pub rate_to_peer: u64,

    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub flag_str: String,
}

/// The torrent record returned by `torrent-add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedTorrent {
    /// Daemon-assigned id.
    pub id: TorrentId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Info hash, hex encoded.
    #[serde(default)]
    pub hash_string: String,
    /// Set when the daemon already knew this torrent (`torrent-duplicate`).
    #[serde(skip)]
    pub duplicate: bool,
}

/// The answer to `torrent-rename-path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameResult {
    /// Torrent whose path was renamed.
    pub id: TorrentId,
    /// The new name.
    pub name: String,
    /// The path that was renamed.
    pub path: String,
}
