use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::{debug, info, trace, warn, Level};

use crate::error::{CoreError, RpcError};

use super::super::config::ClientConfig;
use super::super::context::CallContext;
use super::super::request_id::RequestIdGenerator;
use super::super::types::BlockResult;
use super::super::NearRpc;
use super::connection::{build_http_client, parse_connection};
use super::protocol::{
    block_params, decode_envelope, id_mismatch, parse_jsonrpc_error, JsonRpcRequest,
    JSONRPC_VERSION,
};

/// NEAR JSON-RPC client over HTTP(S).
///
/// Each call is one POST. The client holds no per-call state, so a single
/// instance can serve concurrent callers; request IDs come from the
/// configured [`RequestIdGenerator`].
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: String,
    id_generator: Arc<dyn RequestIdGenerator>,
}

impl HttpRpcClient {
    /// Create a client for an `http://` or `https://` endpoint.
    ///
    /// Headers and timeouts from `config` are baked into the underlying
    /// HTTP client and apply to every call.
    pub fn new(connection: &str, config: ClientConfig) -> Result<Self, CoreError> {
        let url = parse_connection(connection)?;
        let client = build_http_client(&config)?;

        debug!(
            rpc.url = %url,
            headers = config.headers.len(),
            connect_timeout = ?config.connect_timeout,
            request_timeout = ?config.request_timeout,
            "rpc client created"
        );

        Ok(Self {
            client,
            url,
            id_generator: config.id_generator,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform one JSON-RPC call and decode its result into `T`.
    ///
    /// `output` names `T` in log events and decode errors.
    async fn call_for<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        method: &str,
        params: Vec<serde_json::Value>,
        output: &'static str,
    ) -> Result<T, CoreError> {
        let id = self.id_generator.next_id();
        if tracing::enabled!(Level::TRACE) {
            info!(
                rpc.id = id,
                rpc.method = method,
                rpc.output = output,
                rpc.params = %serde_json::Value::Array(params.clone()),
                "performing JSON-RPC call"
            );
        } else {
            info!(
                rpc.id = id,
                rpc.method = method,
                rpc.output = output,
                "performing JSON-RPC call"
            );
        }

        let started = Instant::now();
        let mut decoding_started = None;

        let result = match ctx.run(self.rpc_call(id, method, params)).await {
            Ok(raw) => {
                decoding_started = Some(Instant::now());
                serde_json::from_value::<T>(raw)
                    .map_err(|source| CoreError::Decode { output, source })
            }
            Err(err) => Err(err),
        };

        match decoding_started {
            Some(decoding_started) => info!(
                rpc.id = id,
                rpc.method = method,
                ok = result.is_ok(),
                parsing = ?decoding_started.elapsed(),
                overall = ?started.elapsed(),
                "performed JSON-RPC call"
            ),
            None => info!(
                rpc.id = id,
                rpc.method = method,
                ok = result.is_ok(),
                overall = ?started.elapsed(),
                "performed JSON-RPC call"
            ),
        }

        result
    }

    async fn rpc_call(
        &self,
        id: u64,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        let req = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        let decoded = match decode_envelope(&body) {
            Ok(decoded) => decoded,
            Err(_) if !status.is_success() => {
                return Err(RpcError::HttpStatus {
                    status: status.as_u16(),
                    body,
                }
                .into());
            }
            Err(e) => {
                return Err(RpcError::InvalidResponse(format!(
                    "decode JSON-RPC response: {e}; body={body}"
                ))
                .into());
            }
        };

        if id_mismatch(id, &decoded.id) {
            warn!(
                rpc.id = id,
                rpc.method = method,
                response_id = %decoded.id,
                "JSON-RPC response id does not match request"
            );
        }

        if let Some(err) = decoded.error {
            return Err(parse_jsonrpc_error(err));
        }

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl NearRpc for HttpRpcClient {
    async fn get_block(&self, ctx: &CallContext, block_id: &str) -> Result<BlockResult, CoreError> {
        self.call_for(ctx, "block", block_params(block_id), BlockResult::TYPE_TAG)
            .await
    }
}
