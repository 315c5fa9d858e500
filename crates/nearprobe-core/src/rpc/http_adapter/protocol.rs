use crate::error::{CoreError, RpcError};

pub(super) const JSONRPC_VERSION: &str = "2.0";

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) id: serde_json::Value,
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Decode a response body as a JSON-RPC envelope.
///
/// A body only counts as an envelope when it is an object carrying at least
/// one of `jsonrpc`, `result` or `error`. Proxies and load balancers answer
/// with their own JSON (`{"message": "Service Unavailable"}`), which must not
/// be mistaken for a response with a missing result.
pub(super) fn decode_envelope(body: &str) -> Result<JsonRpcResponse, String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let is_envelope = value.as_object().is_some_and(|obj| {
        ["jsonrpc", "result", "error"]
            .iter()
            .any(|key| obj.contains_key(*key))
    });
    if !is_envelope {
        return Err("body is not a JSON-RPC envelope".to_owned());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// Parameters of the `block` method: a single `{"block_id": ...}` object.
pub(super) fn block_params(block_id: &str) -> Vec<serde_json::Value> {
    vec![serde_json::json!({ "block_id": block_id })]
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// The JSON-RPC spec defines errors as `{"code": <int>, "message": <string>}`
/// with an optional `data` member. If the error value matches that shape, we
/// produce a `ServerError`; otherwise we fall back to `InvalidResponse` with
/// the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
        #[serde(default)]
        data: Option<serde_json::Value>,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => CoreError::Rpc(RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
            data: parsed.data,
        }),
        Err(_) => CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {err}"
        ))),
    }
}

/// True when the response echoes a different ID than the one sent. Missing or
/// null IDs are tolerated; some proxies strip them.
pub(super) fn id_mismatch(sent: u64, received: &serde_json::Value) -> bool {
    match received {
        serde_json::Value::Null => false,
        serde_json::Value::Number(n) => n.as_u64() != Some(sent),
        serde_json::Value::String(s) => s.parse::<u64>().ok() != Some(sent),
        _ => true,
    }
}
