//! # Torrent daemon client using JSON-RPC over HTTP.
//!
//! Speaks the Transmission-compatible control protocol: every command is an HTTP POST of a
//! `{method, arguments, tag}` envelope. The daemon guards its endpoint with a rotating session id
//! handed out through `409 Conflict` answers; the client picks it up and retries transparently.
//!
//! usage:
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use tinytorrent_rpc::{ClientConfig, TorrentRpcClient};
//! use tinytorrent_types::{AddTorrentRequest, TorrentDaemon};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env().with_request_timeout(Duration::from_secs(10));
//!     let client = TorrentRpcClient::try_new(config)?;
//!     client.handshake().await?;
//!
//!     let request = AddTorrentRequest::magnet("magnet:?xt=urn:btih:...").download_dir("/data");
//!     let torrent = client.add(request).await?;
//!     println!("Added torrent: {:?}", torrent);
//!
//!     for t in client.list().await? {
//!         println!("{} {} {:.1}%", t.id, t.name, t.percent_done * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!

#![recursion_limit = "256"]

mod arguments;
mod client;
mod config;
mod conversions;
mod fields;
mod transport;

#[cfg(test)]
mod testutil;

pub use client::TorrentRpcClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use fields::{DETAIL_EXTRA_FIELDS, FIELDS_VERSION, SUMMARY_FIELDS, detail_fields};
pub use transport::{HttpTransport, SESSION_ID_HEADER};

// Used by the integration tests only.
#[cfg(test)]
use {httpmock as _, test_log as _, tracing_subscriber as _};
