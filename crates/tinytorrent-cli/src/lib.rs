//! # TinyTorrent control CLI
//!
//! Drives a daemon through [`tinytorrent_rpc::TorrentRpcClient`] and prints every answer as JSON.
//!
//! ## Usage
//!
//! ```sh,ignore
//! ttctl --url http://nas:9091/transmission/rpc list
//! ttctl add "magnet:?xt=urn:btih:..." --download-dir /data --paused
//! ttctl queue top 3 4
//! ```

use std::{fs, io, path::PathBuf};

use dotenvy as _;
use serde_json::{Value, json};
use thiserror::Error;
use tokio as _;
use tracing::debug;
use tracing_subscriber as _;

use tinytorrent_rpc::TorrentRpcClient;
use tinytorrent_types::{AddTorrentRequest, RpcError, SessionSettingsPatch, TorrentDaemon};

mod cli;

pub use cli::{Cli, Command, QueueDirection, SessionArgs};

/// Error variants for the CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// The daemon call failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A local .torrent file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadTorrent {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An answer could not be rendered as JSON.
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Connect with the global flags and run the command.
pub async fn run(cli: Cli) -> Result<Value, Error> {
    let client = TorrentRpcClient::try_new(cli.client_config())?;
    execute(&client, cli.command).await
}

/// Run one command against `daemon` and return its answer.
pub async fn execute<D: TorrentDaemon>(daemon: &D, command: Command) -> Result<Value, Error> {
    debug!("Running {command:?}");
    let output = match command {
        Command::Session(args) => {
            let patch = SessionSettingsPatch::from(args);
            if !patch.is_empty() {
                daemon.update_session_settings(&patch).await?;
            }
            serde_json::to_value(daemon.session_settings().await?)?
        }
        Command::Stats => serde_json::to_value(daemon.session_stats().await?)?,
        Command::PortTest => json!({ "portIsOpen": daemon.test_port().await? }),
        Command::FreeSpace { path } => serde_json::to_value(daemon.free_space(&path).await?)?,
        Command::List => serde_json::to_value(daemon.list().await?)?,
        Command::Show { id } => serde_json::to_value(daemon.details(id).await?)?,
        Command::Add {
            source,
            download_dir,
            paused,
        } => {
            let mut request = add_request(&source)?.paused(paused);
            request.download_dir = download_dir;
            match daemon.add(request).await? {
                Some(torrent) => json!({
                    "id": torrent.id,
                    "name": torrent.name,
                    "hashString": torrent.hash_string,
                    "duplicate": torrent.duplicate,
                }),
                None => Value::Null,
            }
        }
        Command::Start { ids, now } => {
            daemon.start(ids, now).await?;
            success()
        }
        Command::Stop { ids } => {
            daemon.stop(ids).await?;
            success()
        }
        Command::Verify { ids } => {
            daemon.verify(ids).await?;
            success()
        }
        Command::Reannounce { ids } => {
            daemon.reannounce(ids).await?;
            success()
        }
        Command::Remove { ids, delete_data } => {
            daemon.remove(ids, delete_data).await?;
            success()
        }
        Command::Queue { direction, ids } => {
            daemon.queue_move(direction.into(), ids).await?;
            success()
        }
        Command::Move {
            location,
            ids,
            no_move,
        } => {
            daemon
                .set_location(ids, &location, no_move.then_some(false))
                .await?;
            success()
        }
        Command::Rename { id, path, name } => {
            serde_json::to_value(daemon.rename_path(id, &path, &name).await?)?
        }
        Command::Files {
            id,
            indices,
            unwanted,
        } => {
            daemon.set_files_wanted(id, &indices, !unwanted).await?;
            success()
        }
    };
    Ok(output)
}

/// Links are passed to the daemon; anything else is read as a local .torrent file.
fn add_request(source: &str) -> Result<AddTorrentRequest, Error> {
    if source.starts_with("magnet:") || source.contains("://") {
        return Ok(AddTorrentRequest::magnet(source));
    }
    let path = PathBuf::from(source);
    let bytes = fs::read(&path).map_err(|source| Error::ReadTorrent { path, source })?;
    Ok(AddTorrentRequest::metainfo(bytes))
}

fn success() -> Value {
    json!({ "result": "success" })
}
