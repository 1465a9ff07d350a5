//! Typed decoding of response arguments.
//!
//! Every command decodes the daemon's `arguments` object into one of these shapes before
//! post-processing it, so an unexpected answer surfaces as [`RpcError::MalformedResponse`]
//! instead of a half-filled record.

use serde::{Deserialize, de::DeserializeOwned};

use tinytorrent_types::{AddedTorrent, RpcError, RpcResponse, TorrentDetail, TorrentId};

/// `torrent-get` answer.
#[derive(Debug, Deserialize)]
pub(crate) struct TorrentsResponse<T> {
    pub(crate) torrents: Vec<T>,
}

/// `torrent-add` answer.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddResponse {
    #[serde(rename = "torrent-added")]
    torrent_added: Option<AddedTorrent>,
    #[serde(rename = "torrent-duplicate")]
    torrent_duplicate: Option<AddedTorrent>,
}

impl AddResponse {
    /// Prefer the freshly added record; fall back to the duplicate, flagged as such.
    pub(crate) fn into_added(self) -> Option<AddedTorrent> {
        self.torrent_added.or_else(|| {
            self.torrent_duplicate.map(|mut existing| {
                existing.duplicate = true;
                existing
            })
        })
    }
}

/// `session-test` answer.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PortTestResponse {
    #[serde(rename = "portIsOpen", alias = "port-is-open")]
    port_is_open: Option<bool>,
}

impl PortTestResponse {
    pub(crate) fn is_open(&self) -> bool {
        self.port_is_open.unwrap_or(false)
    }
}

/// Check the daemon's `result`, then decode `arguments`.
pub(crate) fn decode<T: DeserializeOwned>(response: RpcResponse) -> Result<T, RpcError> {
    response.into_success()?.decode_arguments()
}

/// Pick the detail record for `id` out of a `torrent-get` answer.
pub(crate) fn select_detail(
    response: TorrentsResponse<TorrentDetail>,
    id: TorrentId,
) -> Result<TorrentDetail, RpcError> {
    response
        .torrents
        .into_iter()
        .find(|t| t.summary.id == id)
        .ok_or(RpcError::NotFound(id))
}
