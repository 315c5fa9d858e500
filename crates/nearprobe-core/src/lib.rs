pub mod error;
pub mod rpc;

pub use error::{CoreError, RpcError};
pub use rpc::{BlockResult, CallContext, ClientConfig, HttpRpcClient, NearRpc};
