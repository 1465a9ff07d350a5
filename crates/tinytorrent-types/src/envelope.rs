//! Request and response envelopes exchanged with the daemon.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::RpcError;

/// The `result` value the daemon uses for a successful call.
pub const RESULT_SUCCESS: &str = "success";

/// A request envelope: `{method, arguments?, tag?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Daemon method name, e.g. `torrent-get`.
    pub method: String,
    /// Method arguments. Omitted from the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
    /// Opaque correlation tag echoed back by the daemon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

impl RpcRequest {
    /// A request without arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
            tag: None,
        }
    }

    /// A request whose arguments are the serialized form of `arguments`.
    pub fn with_arguments<A: Serialize>(
        method: impl Into<String>,
        arguments: &A,
    ) -> Result<Self, RpcError> {
        let method = method.into();
        let arguments = serde_json::to_value(arguments).map_err(|e| {
            RpcError::Usage(format!("cannot encode arguments for {method}: {e}"))
        })?;
        Ok(Self {
            method,
            arguments: Some(arguments),
            tag: None,
        })
    }

    /// Set the correlation tag.
    pub fn tag(mut self, tag: i64) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// A response envelope: `{result, arguments, tag?}`.
///
/// `arguments` stays untyped until a command decodes it with [`RpcResponse::decode_arguments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// `"success"` or a daemon-supplied error string.
    pub result: String,
    /// Method-specific payload.
    #[serde(default)]
    pub arguments: Value,
    /// Tag echoed from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

impl RpcResponse {
    /// Whether the daemon reported success.
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }

    /// Turn a daemon-level failure into [`RpcError::ServerError`].
    ///
    /// The daemon puts its explanation either in `result` itself or, with `result: "error"`, in
    /// `arguments.message`. Both are kept.
    pub fn into_success(self) -> Result<Self, RpcError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .arguments
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty());
        Err(RpcError::ServerError(match message {
            Some(message) => format!("{}: {}", self.result, message),
            None => self.result,
        }))
    }

    /// Decode `arguments` into a typed record.
    pub fn decode_arguments<T: DeserializeOwned>(self) -> Result<T, RpcError> {
        // A bare `{"result":"success"}` carries no arguments; treat it as an empty object.
        let arguments = match self.arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        serde_json::from_value(arguments).map_err(|e| RpcError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_omits_absent_fields() {
        let request = RpcRequest::new("session-get");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"method": "session-get"})
        );

        let tagged = RpcRequest::with_arguments("torrent-stop", &json!({"ids": [1]}))
            .unwrap()
            .tag(9);
        assert_eq!(
            serde_json::to_value(&tagged).unwrap(),
            json!({"method": "torrent-stop", "arguments": {"ids": [1]}, "tag": 9})
        );
    }

    #[test]
    fn error_result_becomes_server_error() {
        let response: RpcResponse = serde_json::from_value(json!({
            "result": "error",
            "arguments": {"message": "ids required"}
        }))
        .unwrap();
        match response.into_success().unwrap_err() {
            RpcError::ServerError(msg) => assert_eq!(msg, "error: ids required"),
            other => panic!("Expected ServerError, got {other:?}"),
        }

        let transmission_style: RpcResponse =
            serde_json::from_value(json!({"result": "duplicate torrent"})).unwrap();
        match transmission_style.into_success().unwrap_err() {
            RpcError::ServerError(msg) => assert_eq!(msg, "duplicate torrent"),
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn decode_failure_is_malformed_response() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Expected {
            path: String,
        }

        let response: RpcResponse =
            serde_json::from_value(json!({"result": "success", "arguments": {"path": 42}}))
                .unwrap();
        assert!(matches!(
            response.decode_arguments::<Expected>(),
            Err(RpcError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_arguments_decode_as_empty_object() {
        #[derive(Debug, Deserialize, Default)]
        struct Empty {}

        let response: RpcResponse = serde_json::from_value(json!({"result": "success"})).unwrap();
        assert!(response.decode_arguments::<Empty>().is_ok());
    }
}
