//! Typed command surface on top of an [`RpcTransport`].

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use tinytorrent_types::{
    AddTorrentRequest, AddedTorrent, BandwidthGroupUpdate, FreeSpace, QueueMove, RenameResult,
    RpcError, RpcRequest, RpcResponse, SessionSettings, SessionSettingsPatch, SessionStats,
    TorrentDaemon, TorrentDetail, TorrentId, TorrentIds, TorrentSource, TorrentSummary,
};

use crate::arguments::{
    AddArguments, FileSelectionArguments, FreeSpaceArguments, IdsArguments, RemoveArguments,
    RenamePathArguments, SetLocationArguments, TorrentGetArguments,
};
use crate::config::ClientConfig;
use crate::conversions::{AddResponse, PortTestResponse, TorrentsResponse, decode, select_detail};
use crate::fields::{SUMMARY_FIELDS, detail_fields};
use crate::transport::{HttpTransport, RpcTransport};


/// TorrentRpcClient talks to a TinyTorrent (or Transmission) daemon over JSON-RPC.
#[allow(missing_debug_implementations, private_bounds)]
pub struct TorrentRpcClient<T: RpcTransport = HttpTransport> {
    transport: T,
}

impl TorrentRpcClient {
    /// Create a new TorrentRpcClient.
    ///
    /// No request is made; call [`TorrentDaemon::handshake`] to contact the daemon.
    pub fn try_new(config: ClientConfig) -> Result<Self, RpcError> {
        debug!("Creating RPC client for {config:?}");
        let transport = HttpTransport::try_new(&config)?;
        Ok(Self { transport })
    }

    /// Change the per-request timeout. Requests already in flight keep their old limit.
    pub fn update_request_timeout(&self, timeout: Option<Duration>) {
        debug!("Request timeout set to {timeout:?}");
        self.transport.set_request_timeout(timeout);
    }

    /// The timeout applied to each request, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.transport.request_timeout()
    }

    /// The session credential most recently issued by the daemon.
    pub fn session_id(&self) -> Option<String> {
        self.transport.session_id()
    }

    /// The daemon's RPC endpoint.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint().as_str()
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> TorrentRpcClient<T> {
    /// Create a TorrentRpcClient with a custom transport.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Send a raw envelope and return the daemon's answer as is.
    ///
    /// Transport failures are errors; a daemon-level failure is not, check
    /// [`RpcResponse::is_success`] or call [`RpcResponse::into_success`].
    pub async fn send(&self, request: RpcRequest) -> Result<RpcResponse, RpcError> {
        self.transport.send(request).await
    }

    async fn fetch<R: DeserializeOwned>(&self, method: &str) -> Result<R, RpcError> {
        decode(self.transport.send(RpcRequest::new(method)).await?)
    }

    async fn call<A: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        arguments: &A,
    ) -> Result<R, RpcError> {
        let request = RpcRequest::with_arguments(method, arguments)?;
        decode(self.transport.send(request).await?)
    }

    async fn call_unit<A: Serialize>(&self, method: &str, arguments: &A) -> Result<(), RpcError> {
        let request = RpcRequest::with_arguments(method, arguments)?;
        self.transport.send(request).await?.into_success()?;
        Ok(())
    }

    async fn ids_command(&self, method: &str, ids: TorrentIds) -> Result<(), RpcError> {
        debug!("{method} {:?}", ids.as_slice());
        self.call_unit(method, &IdsArguments { ids: &ids }).await?;
        debug!("{method} sent");
        Ok(())
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> TorrentDaemon for TorrentRpcClient<T> {
    async fn handshake(&self) -> Result<SessionSettings, RpcError> {
        debug!("Probing daemon");
        let settings: SessionSettings = self.fetch("session-get").await?;
        info!(
            version = settings.version.as_deref().unwrap_or("unknown"),
            rpc_version = ?settings.rpc_version,
            "Connected to torrent daemon"
        );
        Ok(settings)
    }

    async fn session_settings(&self) -> Result<SessionSettings, RpcError> {
        debug!("Getting session settings");
        let settings = self.fetch("session-get").await?;
        debug!("Session settings: {settings:?}");
        Ok(settings)
    }

    async fn update_session_settings(&self, patch: &SessionSettingsPatch) -> Result<(), RpcError> {
        debug!("Updating session settings with {patch:?}");
        self.call_unit("session-set", patch).await?;
        debug!("Session settings updated");
        Ok(())
    }

    async fn session_stats(&self) -> Result<SessionStats, RpcError> {
        debug!("Getting session statistics");
        let stats = self.fetch("session-stats").await?;
        debug!("Session statistics: {stats:?}");
        Ok(stats)
    }

    async fn test_port(&self) -> Result<bool, RpcError> {
        debug!("Testing peer port");
        let answer: PortTestResponse = self.fetch("session-test").await?;
        debug!("Peer port open: {}", answer.is_open());
        Ok(answer.is_open())
    }

    async fn free_space(&self, path: &str) -> Result<FreeSpace, RpcError> {
        debug!("Checking free space at {path}");
        let space = self
            .call("free-space", &FreeSpaceArguments { path })
            .await?;
        debug!("Free space: {space:?}");
        Ok(space)
    }

    async fn list(&self) -> Result<Vec<TorrentSummary>, RpcError> {
        debug!("Listing torrents");
        let arguments = TorrentGetArguments {
            ids: None,
            fields: SUMMARY_FIELDS,
        };
        let response: TorrentsResponse<TorrentSummary> =
            self.call("torrent-get", &arguments).await?;
        debug!("Listed {} torrents", response.torrents.len());
        Ok(response.torrents)
    }

    async fn details(&self, id: TorrentId) -> Result<TorrentDetail, RpcError> {
        debug!("Getting details for torrent ID {id}");
        let ids = TorrentIds::from(id);
        let fields = detail_fields();
        let arguments = TorrentGetArguments {
            ids: Some(&ids),
            fields: &fields,
        };
        let response: TorrentsResponse<TorrentDetail> =
            self.call("torrent-get", &arguments).await?;
        select_detail(response, id)
    }

    async fn add(&self, request: AddTorrentRequest) -> Result<Option<AddedTorrent>, RpcError> {
        let (metainfo, filename) = match request.source()? {
            TorrentSource::Metainfo(bytes) => {
                debug!("Adding torrent from {} bytes of metainfo", bytes.len());
                (Some(general_purpose::STANDARD.encode(bytes)), None)
            }
            TorrentSource::Link(link) => {
                debug!("Adding torrent from {link}");
                (None, Some(link))
            }
        };
        let arguments = AddArguments {
            metainfo,
            filename,
            download_dir: request.download_dir.as_deref(),
            paused: request.start_paused,
        };
        let response: AddResponse = self.call("torrent-add", &arguments).await?;
        let added = response.into_added();
        debug!("Added {added:?}");
        Ok(added)
    }

    async fn start(&self, ids: impl Into<TorrentIds>, now: bool) -> Result<(), RpcError> {
        let method = if now {
            "torrent-start-now"
        } else {
            "torrent-start"
        };
        self.ids_command(method, ids.into()).await
    }

    async fn stop(&self, ids: impl Into<TorrentIds>) -> Result<(), RpcError> {
        self.ids_command("torrent-stop", ids.into()).await
    }

    async fn verify(&self, ids: impl Into<TorrentIds>) -> Result<(), RpcError> {
        self.ids_command("torrent-verify", ids.into()).await
    }

    async fn reannounce(&self, ids: impl Into<TorrentIds>) -> Result<(), RpcError> {
        self.ids_command("torrent-reannounce", ids.into()).await
    }

    async fn remove(
        &self,
        ids: impl Into<TorrentIds>,
        delete_local_data: bool,
    ) -> Result<(), RpcError> {
        let ids = ids.into();
        debug!(
            "Removing torrents {:?}, delete_local_data={delete_local_data}",
            ids.as_slice()
        );
        let arguments = RemoveArguments {
            ids: &ids,
            delete_local_data,
        };
        self.call_unit("torrent-remove", &arguments).await?;
        debug!("Remove command sent");
        Ok(())
    }

    async fn queue_move(
        &self,
        direction: QueueMove,
        ids: impl Into<TorrentIds>,
    ) -> Result<(), RpcError> {
        self.ids_command(direction.method(), ids.into()).await
    }

    async fn rename_path(
        &self,
        id: TorrentId,
        path: &str,
        name: &str,
    ) -> Result<RenameResult, RpcError> {
        debug!("Renaming {path} to {name} in torrent ID {id}");
        let arguments = RenamePathArguments {
            ids: [id],
            path,
            name,
        };
        let renamed = self.call("torrent-rename-path", &arguments).await?;
        debug!("Renamed: {renamed:?}");
        Ok(renamed)
    }

    async fn set_location(
        &self,
        ids: impl Into<TorrentIds>,
        location: &str,
        move_data: Option<bool>,
    ) -> Result<(), RpcError> {
        let ids = ids.into();
        let move_data = move_data.unwrap_or(true);
        debug!(
            "Relocating torrents {:?} to {location}, move={move_data}",
            ids.as_slice()
        );
        let arguments = SetLocationArguments {
            ids: &ids,
            location,
            move_data,
        };
        self.call_unit("torrent-set-location", &arguments).await
    }

    async fn set_files_wanted(
        &self,
        id: TorrentId,
        indices: &[u32],
        wanted: bool,
    ) -> Result<(), RpcError> {
        if indices.is_empty() {
            debug!("No files to update for torrent ID {id}");
            return Ok(());
        }
        debug!("Setting wanted={wanted} for files {indices:?} of torrent ID {id}");
        self.call_unit(
            "torrent-set",
            &FileSelectionArguments::new(id, indices, wanted),
        )
        .await
    }

    async fn update_bandwidth_group(&self, group: &BandwidthGroupUpdate) -> Result<(), RpcError> {
        debug!("Updating bandwidth group {group:?}");
        self.call_unit("group-set", group).await
    }
}
