//! HTTP transport for the daemon's RPC endpoint.
//!
//! [`RpcTransport`] abstracts a single logical round trip so the typed command surface can be
//! tested against a mock. [`HttpTransport`] is the real implementation: it answers the daemon's
//! session-id challenge, attaches Basic auth and enforces the request timeout.

use std::{
    fmt,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use base64::{Engine as _, engine::general_purpose};
use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
};
use tracing::{debug, instrument, warn};
use url::Url;

use tinytorrent_types::{RpcError, RpcRequest, RpcResponse};

use crate::config::ClientConfig;

/// Header carrying the daemon's session credential, in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// How many times a request is reissued after the daemon rotates the session id.
const MAX_SESSION_RETRIES: u32 = 1;

/// Longest excerpt of an error body kept in [`RpcError::Http`].
const MAX_ERROR_BODY: usize = 256;

/// Internal trait that abstracts sending one envelope to the daemon.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait RpcTransport {
    async fn send(&self, request: RpcRequest) -> Result<RpcResponse, RpcError>;
}

/// Transport speaking JSON-RPC over HTTP POST.
///
/// The session id is the only mutable state. Concurrent requests may race to store a freshly
/// issued id; the last writer wins, which at worst costs one extra retry.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    authorization: Option<HeaderValue>,
    session_id: Mutex<Option<String>>,
    /// Milliseconds, zero when disabled.
    timeout_ms: AtomicU64,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("basic_auth", &self.authorization.is_some())
            .field("session_id", &self.session_id())
            .field("request_timeout", &self.request_timeout())
            .finish()
    }
}

/// What came back from one HTTP attempt.
struct Reply {
    status: StatusCode,
    session_id: Option<String>,
    body: Vec<u8>,
}

impl HttpTransport {
    /// Build a transport from `config`. No request is made.
    pub fn try_new(config: &ClientConfig) -> Result<Self, RpcError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| RpcError::InvalidConfig(format!("invalid RPC URL: {e}")))?;

        let authorization = if config.uses_basic_auth() {
            Some(basic_auth_header(&config.username, &config.password)?)
        } else {
            None
        };

        let client = Client::builder()
            .build()
            .map_err(|e| RpcError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            authorization,
            session_id: Mutex::new(None),
            timeout_ms: AtomicU64::new(timeout_to_millis(config.request_timeout)),
        })
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The session id currently echoed to the daemon.
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_session_id(&self, id: String) {
        *self
            .session_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(id);
    }

    /// The timeout applied to each HTTP attempt, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.timeout_ms.load(Ordering::Relaxed) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Change the timeout for requests issued from now on. `None` or zero disables it.
    pub fn set_request_timeout(&self, timeout: Option<Duration>) {
        self.timeout_ms
            .store(timeout_to_millis(timeout), Ordering::Relaxed);
    }

    /// One POST, bounded by the request timeout. The timer lives inside the returned future and
    /// is dropped with it on every exit path.
    async fn exchange(&self, body: &[u8], session_id: Option<&str>) -> Result<Reply, RpcError> {
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());
        if let Some(id) = session_id {
            builder = builder.header(SESSION_ID_HEADER, id);
        }
        if let Some(auth) = &self.authorization {
            builder = builder.header(AUTHORIZATION, auth.clone());
        }

        let round_trip = async move {
            let response = builder
                .send()
                .await
                .map_err(|e| RpcError::Network(e.to_string()))?;
            let status = response.status();
            let session_id = response
                .headers()
                .get(SESSION_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = response
                .bytes()
                .await
                .map_err(|e| RpcError::Network(e.to_string()))?
                .to_vec();
            Ok(Reply {
                status,
                session_id,
                body,
            })
        };

        match self.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, round_trip)
                .await
                .map_err(|_| RpcError::Timeout(limit))?,
            None => round_trip.await,
        }
    }
}

impl RpcTransport for HttpTransport {
    #[instrument(skip_all, fields(method = %request.method))]
    async fn send(&self, request: RpcRequest) -> Result<RpcResponse, RpcError> {
        let body = serde_json::to_vec(&request)
            .map_err(|e| RpcError::Usage(format!("cannot encode request: {e}")))?;

        let mut retries = 0;
        loop {
            let sent_id = self.session_id();
            debug!(attempt = retries + 1, "Posting RPC request");
            let reply = self.exchange(&body, sent_id.as_deref()).await?;

            if reply.status == StatusCode::CONFLICT {
                match reply.session_id {
                    Some(offered) if sent_id.as_deref() != Some(offered.as_str()) => {
                        self.store_session_id(offered);
                        if retries < MAX_SESSION_RETRIES {
                            retries += 1;
                            debug!("Session id rotated, retrying");
                            continue;
                        }
                        warn!("Daemon rotated the session id again after a retry");
                    }
                    _ => warn!("Daemon rejected the session id without offering a new one"),
                }
            }

            if !reply.status.is_success() {
                return Err(RpcError::Http {
                    status: reply.status.as_u16(),
                    message: body_excerpt(&reply.body),
                });
            }

            return serde_json::from_slice(&reply.body)
                .map_err(|e| RpcError::MalformedResponse(e.to_string()));
        }
    }
}

fn basic_auth_header(username: &str, password: &str) -> Result<HeaderValue, RpcError> {
    let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| RpcError::InvalidConfig(format!("invalid credentials: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

fn timeout_to_millis(timeout: Option<Duration>) -> u64 {
    match timeout {
        None => 0,
        Some(d) if d.is_zero() => 0,
        // Sub-millisecond timeouts round up rather than silently disabling the limit.
        Some(d) => u64::try_from(d.as_millis()).unwrap_or(u64::MAX).max(1),
    }
}

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_is_base64_of_user_colon_password() {
        let header = basic_auth_header("admin", "secret").unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic YWRtaW46c2VjcmV0");
        assert!(header.is_sensitive());
    }

    #[test]
    fn timeout_conversion() {
        assert_eq!(timeout_to_millis(None), 0);
        assert_eq!(timeout_to_millis(Some(Duration::ZERO)), 0);
        assert_eq!(timeout_to_millis(Some(Duration::from_micros(10))), 1);
        assert_eq!(timeout_to_millis(Some(Duration::from_secs(3))), 3000);
    }

    #[test]
    fn timeout_is_mutable_after_construction() {
        let transport = HttpTransport::try_new(&ClientConfig::default()).unwrap();
        assert_eq!(transport.request_timeout(), None);

        transport.set_request_timeout(Some(Duration::from_millis(1500)));
        assert_eq!(
            transport.request_timeout(),
            Some(Duration::from_millis(1500))
        );

        transport.set_request_timeout(None);
        assert_eq!(transport.request_timeout(), None);
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let err = HttpTransport::try_new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, RpcError::InvalidConfig(_)));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let excerpt = body_excerpt(body.as_bytes());
        assert_eq!(excerpt.len(), MAX_ERROR_BODY + 3);
        assert_eq!(body_excerpt(b"  unauthorized\n"), "unauthorized");
    }

    #[test]
    fn debug_hides_credentials() {
        let config = ClientConfig::default().with_credentials("admin", "secret");
        let transport = HttpTransport::try_new(&config).unwrap();
        let printed = format!("{transport:?}");
        assert!(printed.contains("basic_auth: true"));
        assert!(!printed.contains("YWRtaW46c2VjcmV0"));
    }
}
