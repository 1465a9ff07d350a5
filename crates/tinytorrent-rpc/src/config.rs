//! Client configuration.

use std::{env, fmt, time::Duration};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9091/transmission/rpc";

/// Configuration for [`crate::TorrentRpcClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL of the daemon's RPC endpoint.
    pub endpoint: String,
    /// Basic auth user name. Basic auth is used when either this or `password` is non-empty.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Per-request timeout. `None` or zero disables it.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            username: String::new(),
            password: String::new(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// A default configuration pointing at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// - `TT_RPC_URL`
    /// - `TT_RPC_USERNAME`
    /// - `TT_RPC_PASSWORD`
    /// - `TT_RPC_TIMEOUT_MS`
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("TT_RPC_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            username: env::var("TT_RPC_USERNAME").unwrap_or_default(),
            password: env::var("TT_RPC_PASSWORD").unwrap_or_default(),
            request_timeout: env::var("TT_RPC_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_millis),
        }
    }

    /// Set the Basic auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Whether requests carry an `Authorization: Basic` header.
    pub fn uses_basic_auth(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        write!(
            f,
            "ClientConfig(endpoint=\"{}\", username=\"{}\", password=<{}>, request_timeout={:?})",
            self.endpoint,
            self.username,
            if self.password.is_empty() {
                "unset"
            } else {
                "set"
            },
            self.request_timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.uses_basic_auth());
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn either_credential_enables_basic_auth() {
        assert!(ClientConfig::default().with_credentials("admin", "").uses_basic_auth());
        assert!(ClientConfig::default().with_credentials("", "secret").uses_basic_auth());
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClientConfig::new("http://nas:9091/transmission/rpc")
            .with_credentials("admin", "hunter2");
        let printed = format!("{config:?}");
        assert!(printed.contains("admin"));
        assert!(printed.contains("password=<set>"));
        assert!(!printed.contains("hunter2"));
    }
}
