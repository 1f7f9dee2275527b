use alloy_primitives::hex::FromHexError;
use sando_ops::{payload::PayloadError, ClientError};

/// Errors reported by the `sando` commands.
#[derive(Debug, thiserror::Error)]
pub enum SandoError {
    /// A flow failed
    #[error(transparent)]
    Ops(#[from] sando_ops::Error),

    /// Connecting to or querying the node failed
    #[error("RPC error: {0}")]
    Client(#[from] ClientError),

    /// A payload could not be packed or unpacked
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Failed to read file
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Invalid hex string
    #[error("Invalid hex string: {0}")]
    InvalidHex(#[from] FromHexError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for the `sando` commands.
pub type Result<T> = std::result::Result<T, SandoError>;
