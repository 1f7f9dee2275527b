use std::path::PathBuf;

use alloy_primitives::{Address, Bytes, TxHash};
use sando_payload::PayloadError;

use crate::ClientError;

/// Errors surfaced by the deployment, sequencing and recovery flows.
///
/// Each variant names the step that failed so the caller can decide whether a retry is safe.
/// Only [`Error::SubmissionRejected`] and [`Error::Rpc`] leave the chain untouched; a retry after
/// either of them must go back through a fresh nonce and fee fetch. After
/// [`Error::ReceiptUnavailable`] the transaction is in flight and its nonce is taken.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A payload could not be packed. Nothing was sent.
    #[error("Encoding error: {0}")]
    Encoding(#[from] PayloadError),

    /// The bytecode compiler is missing. Detected before any chain call.
    #[error("Compiler unavailable: {0}")]
    CompilerUnavailable(String),

    /// The compiler ran but did not produce bytecode.
    #[error("Failed to compile {}: {reason}", path.display())]
    Compile {
        /// Source file handed to the compiler
        path: PathBuf,
        /// Compiler output or decoding failure
        reason: String,
    },

    /// Deployment was requested with empty bytecode.
    #[error("Refusing to deploy empty bytecode")]
    EmptyBytecode,

    /// A chain read failed.
    #[error("RPC error while fetching {step}: {source}")]
    Rpc {
        /// What was being fetched
        step: &'static str,
        /// The underlying client error
        source: ClientError,
    },

    /// The signer could not produce a signed transaction.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The fee policy is self-contradictory.
    #[error("Invalid fee policy: {0}")]
    InvalidFeePolicy(String),

    /// The node refused the transaction. No gas was spent.
    #[error("Transaction with nonce {nonce} rejected: {reason}")]
    SubmissionRejected {
        /// Nonce the rejected transaction carried
        nonce: u64,
        /// Node-provided reason
        reason: String,
    },

    /// The node accepted the transaction but its receipt could not be fetched.
    #[error("Transaction {tx_hash} with nonce {nonce} submitted, receipt unavailable: {source}")]
    ReceiptUnavailable {
        /// Hash of the submitted transaction
        tx_hash: TxHash,
        /// Nonce the transaction carries
        nonce: u64,
        /// The underlying client error
        source: ClientError,
    },

    /// The transaction was mined but execution failed. Gas was spent.
    #[error("Transaction {tx_hash} reverted after using {gas_used} gas")]
    Reverted {
        /// Hash of the reverted transaction
        tx_hash: TxHash,
        /// Gas consumed by the failed execution
        gas_used: u64,
    },

    /// The factory call reverted or its receipt carried no deployment event.
    #[error("Deployment failed: {reason}")]
    DeploymentFailed {
        /// What went wrong
        reason: String,
        /// Hash of the factory transaction, if one was mined
        tx_hash: Option<TxHash>,
    },

    /// The contract holds none of the wrapped asset.
    #[error("Nothing to recover: {contract} holds no wrapped balance")]
    NothingToRecover {
        /// Contract that was checked
        contract: Address,
    },

    /// A read-only call returned data of the wrong shape.
    #[error("Unexpected return data from {call}: {data}")]
    UnexpectedReturnData {
        /// The call that was made
        call: &'static str,
        /// What came back
        data: Bytes,
    },
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
