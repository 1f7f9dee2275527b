use std::future::Future;

use alloy_primitives::{Address, Bytes, Log, TxHash, U256};
use alloy_transport::TransportError;

/// Errors reported by a [`ChainClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// JSON-RPC transport or node error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Any other failure, e.g. a malformed endpoint
    #[error("{0}")]
    Other(String),
}

/// A confirmed transaction as seen by the flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Whether execution succeeded
    pub success: bool,
    /// Gas consumed, whether or not execution succeeded
    pub gas_used: u64,
    /// Emitted logs, in emission order
    pub logs: Vec<Log>,
}

/// Chain access needed by the sequencer and flows.
///
/// Implementations must not cache: every call goes to the chain. Waiting for a receipt carries no
/// deadline of its own; timeouts and cancellation belong to the implementation or to the caller
/// dropping the future.
pub trait ChainClient {
    /// Native balance of `address`.
    fn balance(&self, address: Address) -> impl Future<Output = Result<U256, ClientError>> + Send;

    /// Number of transactions sent from `address`, i.e. its next nonce.
    fn transaction_count(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<u64, ClientError>> + Send;

    /// Current gas price.
    fn gas_price(&self) -> impl Future<Output = Result<u128, ClientError>> + Send;

    /// Suggested EIP-1559 priority fee.
    fn max_priority_fee(&self) -> impl Future<Output = Result<u128, ClientError>> + Send;

    /// Chain identifier.
    fn chain_id(&self) -> impl Future<Output = Result<u64, ClientError>> + Send;

    /// Read-only call against the latest state.
    fn call(
        &self,
        to: Address,
        input: Bytes,
    ) -> impl Future<Output = Result<Bytes, ClientError>> + Send;

    /// Broadcasts a signed, EIP-2718 encoded transaction.
    fn send_raw_transaction(
        &self,
        raw: Bytes,
    ) -> impl Future<Output = Result<TxHash, ClientError>> + Send;

    /// Blocks until `tx_hash` has a receipt.
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<Receipt, ClientError>> + Send;
}

impl<T: ChainClient + Sync> ChainClient for &T {
    fn balance(&self, address: Address) -> impl Future<Output = Result<U256, ClientError>> + Send {
        (**self).balance(address)
    }

    fn transaction_count(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<u64, ClientError>> + Send {
        (**self).transaction_count(address)
    }

    fn gas_price(&self) -> impl Future<Output = Result<u128, ClientError>> + Send {
        (**self).gas_price()
    }

    fn max_priority_fee(&self) -> impl Future<Output = Result<u128, ClientError>> + Send {
        (**self).max_priority_fee()
    }

    fn chain_id(&self) -> impl Future<Output = Result<u64, ClientError>> + Send {
        (**self).chain_id()
    }

    fn call(
        &self,
        to: Address,
        input: Bytes,
    ) -> impl Future<Output = Result<Bytes, ClientError>> + Send {
        (**self).call(to, input)
    }

    fn send_raw_transaction(
        &self,
        raw: Bytes,
    ) -> impl Future<Output = Result<TxHash, ClientError>> + Send {
        (**self).send_raw_transaction(raw)
    }

    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<Receipt, ClientError>> + Send {
        (**self).wait_for_receipt(tx_hash)
    }
}
