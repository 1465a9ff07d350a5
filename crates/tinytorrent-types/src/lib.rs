//! # TinyTorrent Types
//!
//! This crate defines the wire types, the error taxonomy and the [`TorrentDaemon`] trait shared by
//! every client of the TinyTorrent daemon's JSON-RPC control protocol.

use std::time::Duration;

use thiserror::Error;

mod args;
mod envelope;
mod session;
mod torrent;

pub use args::{AddTorrentRequest, BandwidthGroupUpdate, QueueMove, TorrentIds, TorrentSource};
pub use envelope::{RESULT_SUCCESS, RpcRequest, RpcResponse};
pub use session::{
    EncryptionMode, FreeSpace, SessionSettings, SessionSettingsPatch, SessionStats, StatsDetails,
};
pub use torrent::{
    AddedTorrent, PeerEntry, RenameResult, TorrentDetail, TorrentFile, TorrentId, TorrentStatus,
    TorrentSummary, TrackerEntry,
};

/// Error type for daemon RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The daemon answered with a non-success HTTP status.
    #[error("transport error: HTTP {status}{}", fmt_message(.message))]
    Http {
        /// HTTP status code returned by the daemon.
        status: u16,
        /// Response body, trimmed. Empty when the daemon sent none.
        message: String,
    },

    /// Connection-level failure before any HTTP status was received.
    #[error("network error: {0}")]
    Network(String),

    /// The configured request timeout elapsed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The daemon processed the request and reported a failure in the `result` field.
    #[error("server error: {0}")]
    ServerError(String),

    /// The requested torrent is not known to the daemon.
    #[error("torrent {0} not found")]
    NotFound(TorrentId),

    /// The call was rejected locally before any request was sent.
    #[error("invalid usage: {0}")]
    Usage(String),

    /// The daemon's answer could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The client could not be built from its configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RpcError {
    /// HTTP status carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures of the transport itself (HTTP status, network, timeout).
    ///
    /// These are the errors a caller may reasonably retry. Daemon-level rejections, not-found
    /// and usage errors are terminal.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Network(_) | Self::Timeout(_)
        )
    }

    /// True when a torrent lookup found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

fn fmt_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

/// TorrentDaemon defines the typed command surface of the daemon.
///
/// Every method issues exactly one request (two when the daemon rotates its session credential),
/// except [`TorrentDaemon::set_files_wanted`] with an empty index list, which issues none.
#[allow(async_fn_in_trait)]
pub trait TorrentDaemon {
    /// Check connectivity and fetch the initial session settings.
    async fn handshake(&self) -> Result<SessionSettings, RpcError>;
    /// Fetch the full session settings record.
    async fn session_settings(&self) -> Result<SessionSettings, RpcError>;
    /// Apply a partial settings patch. Only keys present in the patch are sent.
    async fn update_session_settings(&self, patch: &SessionSettingsPatch) -> Result<(), RpcError>;
    /// Get session statistics.
    async fn session_stats(&self) -> Result<SessionStats, RpcError>;
    /// Ask the daemon whether its peer port is reachable. Defaults to `false` if unreported.
    async fn test_port(&self) -> Result<bool, RpcError>;
    /// Free space available at `path` on the daemon's host.
    async fn free_space(&self, path: &str) -> Result<FreeSpace, RpcError>;
    /// List all torrents using the summary field projection.
    async fn list(&self) -> Result<Vec<TorrentSummary>, RpcError>;
    /// Fetch files, trackers, peers and piece state for one torrent.
    ///
    /// Fails with [`RpcError::NotFound`] when the daemon does not return the torrent.
    async fn details(&self, id: TorrentId) -> Result<TorrentDetail, RpcError>;
    /// Add a torrent from a metainfo blob or a magnet link.
    ///
    /// Returns the added torrent, the pre-existing one when the daemon reports a duplicate, or
    /// `None` if the daemon reports neither.
    async fn add(&self, request: AddTorrentRequest) -> Result<Option<AddedTorrent>, RpcError>;
    /// Start torrents. With `now` set the download queue is bypassed.
    async fn start(&self, ids: impl Into<TorrentIds>, now: bool) -> Result<(), RpcError>;
    /// Stop torrents.
    async fn stop(&self, ids: impl Into<TorrentIds>) -> Result<(), RpcError>;
    /// Queue torrents for a hash check.
    async fn verify(&self, ids: impl Into<TorrentIds>) -> Result<(), RpcError>;
    /// Ask trackers for more peers right away.
    async fn reannounce(&self, ids: impl Into<TorrentIds>) -> Result<(), RpcError>;
    /// Remove torrents. If `delete_local_data` is true, downloaded data is deleted as well.
    async fn remove(
        &self,
        ids: impl Into<TorrentIds>,
        delete_local_data: bool,
    ) -> Result<(), RpcError>;
    /// Move torrents within the download queue.
    async fn queue_move(
        &self,
        direction: QueueMove,
        ids: impl Into<TorrentIds>,
    ) -> Result<(), RpcError>;
    /// Rename a file or directory inside a torrent.
    async fn rename_path(
        &self,
        id: TorrentId,
        path: &str,
        name: &str,
    ) -> Result<RenameResult, RpcError>;
    /// Change the data location of torrents. `move_data` defaults to `true`.
    async fn set_location(
        &self,
        ids: impl Into<TorrentIds>,
        location: &str,
        move_data: Option<bool>,
    ) -> Result<(), RpcError>;
    /// Mark files of a torrent as wanted or unwanted. An empty index list is a no-op.
    async fn set_files_wanted(
        &self,
        id: TorrentId,
        indices: &[u32],
        wanted: bool,
    ) -> Result<(), RpcError>;
    /// Create or update a bandwidth group. Only the fields set on `group` are sent.
    async fn update_bandwidth_group(&self, group: &BandwidthGroupUpdate) -> Result<(), RpcError>;
}
