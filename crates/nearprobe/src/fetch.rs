use eyre::{ensure, eyre, WrapErr};

use nearprobe_core::rpc::{BlockResult, CallContext, NearRpc};
use nearprobe_core::{CoreError, RpcError};

/// Fetch `block_id` and check the node answered for the block we asked about.
///
/// Numeric ids are compared against the header height, anything else against
/// the header hash.
pub(crate) async fn fetch_block(
    rpc: &dyn NearRpc,
    rpc_url: &str,
    ctx: &CallContext,
    block_id: &str,
) -> eyre::Result<BlockResult> {
    let block = rpc
        .get_block(ctx, block_id)
        .await
        .map_err(|err| eyre!(format_rpc_error(rpc_url, &err)))
        .wrap_err_with(|| format!("while fetching block `{block_id}`"))?;

    match block_id.parse::<u64>() {
        Ok(height) => ensure!(
            block.header.height == height,
            "block height mismatch: requested {height}, got {}",
            block.header.height
        ),
        Err(_) => ensure!(
            block.header.hash == block_id,
            "block hash mismatch: requested {block_id}, got {}",
            block.header.hash
        ),
    }

    tracing::info!(
        height = block.header.height,
        hash = %block.header.hash,
        author = %block.author,
        chunks = block.chunks.len(),
        "fetched block"
    );
    Ok(block)
}

pub(crate) fn render_block(block: &BlockResult, compact: bool) -> eyre::Result<String> {
    let rendered = if compact {
        serde_json::to_string(block)
    } else {
        serde_json::to_string_pretty(block)
    };
    rendered.context("encode block as JSON")
}

pub(crate) fn format_rpc_error(rpc_url: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("block query against `{rpc_url}` failed"),
        format!("RPC error: {err}"),
    ];

    let hint = match err {
        CoreError::Rpc(RpcError::Transport(source)) if source.is_connect() => Some(
            "hint: could not connect; verify the endpoint host, port and your network access",
        ),
        CoreError::Rpc(RpcError::Transport(source)) if source.is_timeout() => {
            Some("hint: the HTTP request timed out; the node may be overloaded")
        }
        CoreError::Rpc(RpcError::Transport(_)) => Some(
            "hint: request could not be sent; verify URL format, TLS setup and endpoint reachability",
        ),
        CoreError::Rpc(RpcError::Cancelled) => Some("hint: the call was interrupted"),
        CoreError::Rpc(RpcError::DeadlineExceeded) => {
            Some("hint: the node did not answer in time; raise --timeout-secs")
        }
        CoreError::Rpc(RpcError::HttpStatus { status: 401 | 403, .. }) => Some(
            "hint: authentication failed; pass credentials with --header \"Authorization: ...\"",
        ),
        CoreError::Rpc(RpcError::HttpStatus { status: 404, .. }) => {
            Some("hint: endpoint path is invalid; verify the full RPC URL")
        }
        CoreError::Rpc(RpcError::HttpStatus { status: 429, .. }) => {
            Some("hint: the endpoint is rate limiting requests; retry later")
        }
        CoreError::Rpc(RpcError::ServerError { .. }) => Some(
            "hint: the node rejected the query; check the block id and whether the node still \
             keeps that block (non-archival nodes garbage-collect old blocks)",
        ),
        CoreError::Decode { .. } => {
            Some("hint: the node's block schema does not match; check the node version")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        lines.push(hint.to_owned());
    }

    lines.join("\n")
}
