//! Raw transaction assembly, submission and confirmation.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, U256};
use alloy_rpc_types_eth::TransactionRequest;
use tracing::{debug, info, trace, warn};

use crate::{ChainClient, Error, Receipt, Result, TransactionSigner};

/// How fee fields are chosen for a transaction.
///
/// `None` fields are fetched from the chain immediately before each transaction is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// Type 0 transaction with a single gas price.
    Legacy {
        /// Fixed gas price, or `None` for `eth_gasPrice`
        gas_price: Option<u128>,
    },
    /// Type 2 transaction.
    Eip1559 {
        /// Fixed tip, or `None` for `eth_maxPriorityFeePerGas`
        max_priority_fee_per_gas: Option<u128>,
        /// Fixed fee cap, or `None` for `2 * eth_gasPrice + tip`
        max_fee_per_gas: Option<u128>,
    },
}

impl FeePolicy {
    /// Legacy pricing at the current gas price.
    pub const fn legacy() -> Self {
        Self::Legacy { gas_price: None }
    }

    /// EIP-1559 pricing with fetched tip and fee cap.
    pub const fn eip1559() -> Self {
        Self::Eip1559 { max_priority_fee_per_gas: None, max_fee_per_gas: None }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::eip1559()
    }
}

/// Concrete fee fields for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fees {
    /// Legacy gas price
    Legacy {
        /// Gas price in wei
        gas_price: u128,
    },
    /// EIP-1559 fee pair
    Eip1559 {
        /// Tip in wei
        max_priority_fee_per_gas: u128,
        /// Fee cap in wei
        max_fee_per_gas: u128,
    },
}

/// Builds, signs, submits and confirms one transaction at a time.
///
/// No state is kept between calls: nonce and fees are read fresh for every transaction, and a
/// rejected or reverted transaction is reported, never resubmitted.
#[derive(Debug)]
pub struct Sequencer<C, S> {
    client: C,
    signer: S,
    chain_id: u64,
}

impl<C, S> Sequencer<C, S>
where
    C: ChainClient,
    S: TransactionSigner,
{
    /// Creates a sequencer that signs with `signer` for `chain_id`.
    pub const fn new(client: C, signer: S, chain_id: u64) -> Self {
        Self { client, signer, chain_id }
    }

    /// The chain client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// The sending address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The chain id every transaction is signed for.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sends `calldata` to `destination` with no value attached.
    pub async fn send(
        &self,
        destination: Address,
        calldata: Bytes,
        fee_policy: FeePolicy,
        gas_limit: u64,
    ) -> Result<Receipt> {
        self.send_with_value(destination, calldata, U256::ZERO, fee_policy, gas_limit).await
    }

    /// Sends `calldata` and `value` to `destination` and waits for the receipt.
    ///
    /// The nonce is read exactly once, before fees are resolved and before the transaction is
    /// built. Returns [`Error::SubmissionRejected`] if the node refuses the transaction,
    /// [`Error::ReceiptUnavailable`] if it was accepted but never confirmed, and
    /// [`Error::Reverted`] if it is mined but fails.
    pub async fn send_with_value(
        &self,
        destination: Address,
        calldata: Bytes,
        value: U256,
        fee_policy: FeePolicy,
        gas_limit: u64,
    ) -> Result<Receipt> {
        let sender = self.signer.address();
        let nonce = self
            .client
            .transaction_count(sender)
            .await
            .map_err(|source| Error::Rpc { step: "nonce", source })?;
        let fees = self.resolve_fees(fee_policy).await?;
        debug!(
            %sender, %destination, nonce, ?fees, gas_limit, %value,
            calldata_len = calldata.len(),
            "Building transaction"
        );

        let tx = self.build_request(destination, calldata, value, nonce, fees, gas_limit);
        let raw = self.signer.sign(tx).await?;
        trace!(%raw, "Signed transaction");

        let tx_hash = self
            .client
            .send_raw_transaction(raw)
            .await
            .map_err(|e| Error::SubmissionRejected { nonce, reason: e.to_string() })?;
        info!(%tx_hash, nonce, "Transaction submitted");

        let receipt = self
            .client
            .wait_for_receipt(tx_hash)
            .await
            .map_err(|source| Error::ReceiptUnavailable { tx_hash, nonce, source })?;

        if !receipt.success {
            warn!(%tx_hash, gas_used = receipt.gas_used, "Transaction reverted");
            return Err(Error::Reverted { tx_hash, gas_used: receipt.gas_used });
        }
        info!(%tx_hash, gas_used = receipt.gas_used, "Transaction confirmed");

        Ok(receipt)
    }

    /// Fills in the fee fields `policy` leaves open.
    pub async fn resolve_fees(&self, policy: FeePolicy) -> Result<Fees> {
        match policy {
            FeePolicy::Legacy { gas_price: Some(gas_price) } => Ok(Fees::Legacy { gas_price }),
            FeePolicy::Legacy { gas_price: None } => {
                let gas_price = self.fetch_gas_price().await?;
                Ok(Fees::Legacy { gas_price })
            }
            FeePolicy::Eip1559 { max_priority_fee_per_gas, max_fee_per_gas } => {
                let priority = match max_priority_fee_per_gas {
                    Some(priority) => priority,
                    None => self
                        .client
                        .max_priority_fee()
                        .await
                        .map_err(|source| Error::Rpc { step: "priority fee", source })?,
                };
                let max_fee = match max_fee_per_gas {
                    Some(max_fee) if max_fee < priority => {
                        return Err(Error::InvalidFeePolicy(format!(
                            "max fee {max_fee} is below priority fee {priority}"
                        )))
                    }
                    Some(max_fee) => max_fee,
                    None => {
                        self.fetch_gas_price().await?.saturating_mul(2).saturating_add(priority)
                    }
                };
                Ok(Fees::Eip1559 { max_priority_fee_per_gas: priority, max_fee_per_gas: max_fee })
            }
        }
    }

    async fn fetch_gas_price(&self) -> Result<u128> {
        self.client.gas_price().await.map_err(|source| Error::Rpc { step: "gas price", source })
    }

    fn build_request(
        &self,
        destination: Address,
        calldata: Bytes,
        value: U256,
        nonce: u64,
        fees: Fees,
        gas_limit: u64,
    ) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_to(destination)
            .with_input(calldata)
            .with_value(value)
            .with_nonce(nonce)
            .with_chain_id(self.chain_id)
            .with_gas_limit(gas_limit);
        match fees {
            Fees::Legacy { gas_price } => tx.set_gas_price(gas_price),
            Fees::Eip1559 { max_priority_fee_per_gas, max_fee_per_gas } => {
                tx.set_max_priority_fee_per_gas(max_priority_fee_per_gas);
                tx.set_max_fee_per_gas(max_fee_per_gas);
            }
        }
        tx
    }
}
