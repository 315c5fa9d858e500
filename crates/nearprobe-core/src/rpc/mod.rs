//! NEAR node RPC abstraction layer.
//!
//! Defines the [`NearRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]) along with its call context,
//! request ID generation, configuration and response schema.

mod config;
mod context;
mod http_adapter;
mod request_id;
pub mod types;

pub use config::{ClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use context::CallContext;
pub use http_adapter::HttpRpcClient;
pub use request_id::{RequestIdCounter, RequestIdGenerator};
pub use types::{BlockHeader, BlockResult, ChunkHeader};

use async_trait::async_trait;

use crate::error::CoreError;

/// The node RPC methods nearprobe needs.
///
/// Implementations handle transport, request IDs and response decoding
/// internally, and must abort promptly when `ctx` is cancelled or expires.
#[async_trait]
pub trait NearRpc: Send + Sync {
    /// Fetch a block by height or hash. The node validates `block_id`.
    async fn get_block(&self, ctx: &CallContext, block_id: &str) -> Result<BlockResult, CoreError>;
}
