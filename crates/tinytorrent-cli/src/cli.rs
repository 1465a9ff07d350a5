use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tinytorrent_rpc::{ClientConfig, DEFAULT_ENDPOINT};
use tinytorrent_types::{QueueMove, SessionSettingsPatch, TorrentId};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(name = "ttctl", version, about, long_about = None)]
pub struct Cli {
    /// URL of the daemon's RPC endpoint.
    #[arg(long, env = "TT_RPC_URL", default_value = DEFAULT_ENDPOINT)]
    pub url: String,

    /// Basic auth user name.
    #[arg(long, env = "TT_RPC_USERNAME", default_value = "")]
    pub username: String,

    /// Basic auth password.
    #[arg(long, env = "TT_RPC_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Per-request timeout in milliseconds. Zero disables it.
    #[arg(long, env = "TT_RPC_TIMEOUT_MS", default_value_t = 0)]
    pub timeout_ms: u64,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Client configuration from the global flags.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.url).with_credentials(&self.username, &self.password);
        match self.timeout_ms {
            0 => config,
            ms => config.with_request_timeout(Duration::from_millis(ms)),
        }
    }
}

/// Daemon commands. Every command prints its answer as JSON.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show session settings, applying any given changes first.
    Session(SessionArgs),

    /// Show session statistics.
    Stats,

    /// Check whether the peer port is reachable from outside.
    PortTest,

    /// Show free space at a path on the daemon host.
    FreeSpace {
        /// Directory to check.
        path: String,
    },

    /// List all torrents.
    List,

    /// Show files, trackers, peers and pieces of one torrent.
    Show {
        /// Torrent id.
        id: TorrentId,
    },

    /// Add a torrent from a magnet link, a URL or a local .torrent file.
    Add {
        /// Magnet link, URL or path to a .torrent file.
        source: String,

        /// Directory to download into.
        #[arg(long)]
        download_dir: Option<String>,

        /// Add without starting.
        #[arg(long)]
        paused: bool,
    },

    /// Start torrents.
    Start {
        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,

        /// Bypass the download queue.
        #[arg(long)]
        now: bool,
    },

    /// Stop torrents.
    Stop {
        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },

    /// Verify local data of torrents.
    Verify {
        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },

    /// Ask trackers for more peers.
    Reannounce {
        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },

    /// Remove torrents.
    Remove {
        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,

        /// Also delete downloaded data.
        #[arg(long)]
        delete_data: bool,
    },

    /// Move torrents within the download queue.
    Queue {
        /// Where to move the torrents.
        #[arg(value_enum)]
        direction: QueueDirection,

        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,
    },

    /// Change the data location of torrents.
    Move {
        /// New location on the daemon host.
        location: String,

        /// Torrent ids.
        #[arg(required = true)]
        ids: Vec<TorrentId>,

        /// Only point the torrents at the new location, do not move data.
        #[arg(long)]
        no_move: bool,
    },

    /// Rename a file or directory inside a torrent.
    Rename {
        /// Torrent id.
        id: TorrentId,

        /// Path to rename, relative to the torrent root.
        path: String,

        /// New name.
        name: String,
    },

    /// Mark files of a torrent as wanted or unwanted.
    Files {
        /// Torrent id.
        id: TorrentId,

        /// File indices.
        indices: Vec<u32>,

        /// Mark the files unwanted instead.
        #[arg(long)]
        unwanted: bool,
    },
}

/// Session settings that can be changed from the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Default download directory.
    #[arg(long)]
    pub download_dir: Option<String>,

    /// Number of torrents downloading at once.
    #[arg(long)]
    pub download_queue_size: Option<i64>,

    /// Global download limit in KiB/s.
    #[arg(long)]
    pub speed_limit_down: Option<u64>,

    /// Global upload limit in KiB/s.
    #[arg(long)]
    pub speed_limit_up: Option<u64>,

    /// Incoming peer port.
    #[arg(long)]
    pub peer_port: Option<u16>,
}

impl From<SessionArgs> for SessionSettingsPatch {
    fn from(args: SessionArgs) -> Self {
        Self {
            download_dir: args.download_dir,
            download_queue_size: args.download_queue_size,
            speed_limit_down: args.speed_limit_down,
            speed_limit_down_enabled: args.speed_limit_down.map(|_| true),
            speed_limit_up: args.speed_limit_up,
            speed_limit_up_enabled: args.speed_limit_up.map(|_| true),
            peer_port: args.peer_port,
            ..Default::default()
        }
    }
}

/// Queue move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[allow(missing_docs)]
pub enum QueueDirection {
    Top,
    Up,
    Down,
    Bottom,
}

impl From<QueueDirection> for QueueMove {
    fn from(direction: QueueDirection) -> Self {
        match direction {
            QueueDirection::Top => Self::Top,
            QueueDirection::Up => Self::Up,
            QueueDirection::Down => Self::Down,
            QueueDirection::Bottom => Self::Bottom,
        }
    }
}
