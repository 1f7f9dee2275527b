//! [`ChainClient`] backed by an alloy provider.

use std::time::Duration;

use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use tracing::{trace, warn};

use crate::{ChainClient, ClientError, Receipt};

/// Interval between `eth_getTransactionReceipt` polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Consecutive failed receipt polls tolerated before giving up.
pub const DEFAULT_MAX_POLL_ERRORS: u32 = 5;

/// JSON-RPC chain client.
#[derive(Debug, Clone)]
pub struct RpcClient<P> {
    provider: P,
    poll_interval: Duration,
    max_poll_errors: u32,
}

impl RpcClient<RootProvider> {
    /// Connects to an HTTP JSON-RPC endpoint.
    pub fn connect_http(url: &str) -> Result<Self, ClientError> {
        let parsed = url
            .parse()
            .map_err(|e| ClientError::Other(format!("Invalid RPC URL '{url}': {e}")))?;
        Ok(Self::new(RootProvider::new_http(parsed)))
    }
}

impl<P> RpcClient<P> {
    /// Wraps an existing provider.
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_errors: DEFAULT_MAX_POLL_ERRORS,
        }
    }

    /// Sets the receipt polling interval.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets how many consecutive receipt polls may fail before the wait gives up.
    pub const fn with_max_poll_errors(mut self, max_poll_errors: u32) -> Self {
        self.max_poll_errors = max_poll_errors;
        self
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> ChainClient for RpcClient<P> {
    async fn balance(&self, address: Address) -> Result<U256, ClientError> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, ClientError> {
        Ok(self.provider.get_transaction_count(address).await?)
    }

    async fn gas_price(&self) -> Result<u128, ClientError> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn max_priority_fee(&self) -> Result<u128, ClientError> {
        Ok(self.provider.get_max_priority_fee_per_gas().await?)
    }

    async fn chain_id(&self) -> Result<u64, ClientError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, ClientError> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        Ok(self.provider.call(tx).await?)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, ClientError> {
        let pending = self.provider.send_raw_transaction(&raw).await?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Receipt, ClientError> {
        let mut errors = 0;
        loop {
            match self.provider.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => return Ok(convert_receipt(&receipt)),
                Ok(None) => {
                    errors = 0;
                    trace!(%tx_hash, "Receipt not available yet");
                }
                Err(err) if errors < self.max_poll_errors => {
                    errors += 1;
                    warn!(%tx_hash, %err, errors, "Receipt poll failed, retrying");
                }
                Err(err) => return Err(err.into()),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn convert_receipt(receipt: &TransactionReceipt) -> Receipt {
    Receipt {
        tx_hash: receipt.transaction_hash(),
        success: receipt.status(),
        gas_used: receipt.gas_used(),
        logs: receipt.inner.logs().iter().map(|log| log.inner.clone()).collect(),
    }
}
