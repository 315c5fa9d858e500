//! JSON-RPC client for NEAR nodes over HTTP.
//!
//! Implements [`NearRpc`](super::NearRpc) using `reqwest`: one POST per
//! call, configurable default headers and timeouts, and cancellation through
//! [`CallContext`](super::CallContext).

mod client;
mod connection;
mod protocol;

pub use client::HttpRpcClient;
