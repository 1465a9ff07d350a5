//! Caller-facing argument types for the typed command surface.

use serde::{Deserialize, Serialize};

use crate::{RpcError, TorrentId};

/// A list of torrent ids. Always sent as a JSON array.
///
/// A single id converts into a one-element list, so callers holding one id and callers holding
/// many go through the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TorrentIds(Vec<TorrentId>);

impl TorrentIds {
    /// The ids, in caller order.
    pub fn as_slice(&self) -> &[TorrentId] {
        &self.0
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<TorrentId> for TorrentIds {
    fn from(id: TorrentId) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<TorrentId>> for TorrentIds {
    fn from(ids: Vec<TorrentId>) -> Self {
        Self(ids)
    }
}

impl From<&[TorrentId]> for TorrentIds {
    fn from(ids: &[TorrentId]) -> Self {
        Self(ids.to_vec())
    }
}

impl<const N: usize> From<[TorrentId; N]> for TorrentIds {
    fn from(ids: [TorrentId; N]) -> Self {
        Self(ids.to_vec())
    }
}

/// Direction of a queue reposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMove {
    /// Move to the front of the queue.
    Top,
    /// Move one slot towards the front.
    Up,
    /// Move one slot towards the back.
    Down,
    /// Move to the back of the queue.
    Bottom,
}

impl QueueMove {
    /// The daemon method implementing this move.
    pub fn method(self) -> &'static str {
        match self {
            Self::Top => "queue-move-top",
            Self::Up => "queue-move-up",
            Self::Down => "queue-move-down",
            Self::Bottom => "queue-move-bottom",
        }
    }
}

/// Where a new torrent comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource<'a> {
    /// Raw `.torrent` file contents.
    Metainfo(&'a [u8]),
    /// A magnet URI or a URL the daemon can fetch.
    Link(&'a str),
}

/// Options for adding a torrent.
///
/// Exactly one of `metainfo` and `magnet_link` must be set; [`AddTorrentRequest::source`]
/// enforces this before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTorrentRequest {
    /// Raw metainfo bytes.
    pub metainfo: Option<Vec<u8>>,
    /// Magnet URI or fetchable URL.
    pub magnet_link: Option<String>,
    /// Target directory. The daemon default is used when unset.
    pub download_dir: Option<String>,
    /// Add the torrent without starting it.
    pub start_paused: bool,
}

impl AddTorrentRequest {
    /// Add from a magnet URI or URL.
    pub fn magnet(link: impl Into<String>) -> Self {
        Self {
            magnet_link: Some(link.into()),
            ..Default::default()
        }
    }

    /// Add from raw metainfo bytes.
    pub fn metainfo(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            metainfo: Some(bytes.into()),
            ..Default::default()
        }
    }

    /// Set the target directory.
    pub fn download_dir(mut self, dir: impl Into<String>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Set whether the torrent is added paused.
    pub fn paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    /// Validate that exactly one source is present.
    pub fn source(&self) -> Result<TorrentSource<'_>, RpcError> {
        match (&self.metainfo, &self.magnet_link) {
            (Some(_), Some(_)) => Err(RpcError::Usage(
                "provide either metainfo or a magnet link, not both".into(),
            )),
            (None, None) => Err(RpcError::Usage(
                "either metainfo or a magnet link is required".into(),
            )),
            (Some(bytes), None) => Ok(TorrentSource::Metainfo(bytes)),
            (None, Some(link)) => Ok(TorrentSource::Link(link)),
        }
    }
}

/// A sparse bandwidth group update for `group-set`.
///
/// Only the fields that are set end up in the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandwidthGroupUpdate {
    /// Group name.
    pub name: String,
    /// Whether torrents in the group also obey the session-wide limits.
    #[serde(
        rename = "honorsSessionLimits",
        skip_serializing_if = "Option::is_none"
    )]
    pub honors_session_limits: Option<bool>,
    /// Enable the download limit.
    #[serde(
        rename = "speed-limit-down-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed_limit_down_enabled: Option<bool>,
    /// Download limit in KiB/s.
    #[serde(rename = "speed-limit-down", skip_serializing_if = "Option::is_none")]
    pub speed_limit_down: Option<u64>,
    /// Enable the upload limit.
    #[serde(
        rename = "speed-limit-up-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed_limit_up_enabled: Option<bool>,
    /// Upload limit in KiB/s.
    #[serde(rename = "speed-limit-up", skip_serializing_if = "Option::is_none")]
    pub speed_limit_up: Option<u64>,
}

impl BandwidthGroupUpdate {
    /// An update that only names the group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
