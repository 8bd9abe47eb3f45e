//! Error types for the RPC and orchestration layers.

use thiserror::Error;

use repstash_core::{CryptoError, FormatError};

/// Errors talking to the ledger node.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node answered with an error message.
    #[error("node error: {0}")]
    Node(String),

    /// The node answered with a field we could not interpret.
    #[error("malformed node response: {0}")]
    Malformed(String),
}

/// Errors from the covert-channel orchestration.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("account balance unusable: {0}")]
    Balance(#[from] FormatError),

    #[error("account frontier is not a 32-byte hex hash: {0:?}")]
    MalformedFrontier(String),
}
