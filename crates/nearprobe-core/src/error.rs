#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("failed to decode {output} from JSON-RPC result: {source}")]
    Decode {
        output: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// True when the call was aborted by its context (cancellation or deadline)
    /// rather than failing on the wire or at the node.
    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            Self::Rpc(RpcError::Cancelled) | Self::Rpc(RpcError::DeadlineExceeded)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("call cancelled before the node responded")]
    Cancelled,

    #[error("call deadline exceeded before the node responded")]
    DeadlineExceeded,

    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("JSON-RPC server error {code}: {message}")]
    ServerError {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_carries_node_message() {
        let err = CoreError::from(RpcError::ServerError {
            code: -32000,
            message: "Block not found".to_owned(),
            data: None,
        });
        let rendered = err.to_string();
        assert!(rendered.contains("-32000"));
        assert!(rendered.contains("Block not found"));
    }

    #[test]
    fn only_context_failures_count_as_aborted() {
        assert!(CoreError::from(RpcError::Cancelled).is_aborted());
        assert!(CoreError::from(RpcError::DeadlineExceeded).is_aborted());
        assert!(!CoreError::from(RpcError::InvalidResponse("x".into())).is_aborted());
        assert!(!CoreError::InvalidConfig("x".into()).is_aborted());
    }
}
