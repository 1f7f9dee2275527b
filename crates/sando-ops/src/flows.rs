//! Funding, recovery and control flows built on the [`Sequencer`].

use alloy_primitives::{address, Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use sando_payload::{encode_destroy, encode_recover, opcode, Frontrun};
use tracing::{debug, info};

use crate::{ChainClient, Error, FeePolicy, Receipt, Result, Sequencer, TransactionSigner};

#[allow(missing_docs)]
mod abi {
    alloy_sol_types::sol! {
        interface IWETH {
            function deposit() external payable;
            function transfer(address to, uint256 value) external returns (bool);
            function balanceOf(address owner) external view returns (uint256);
        }
    }
}

pub use abi::IWETH;

/// Canonical wrapped ether on Ethereum mainnet.
pub const MAINNET_WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

/// Default gas limit for contract calls made by the flows.
pub const DEFAULT_GAS_LIMIT: u64 = 250_000;

/// Gas limit of a plain native transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Receipts of a confirmed [`Flows::fund`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funding {
    /// The wrap (`deposit`) transaction
    pub wrap: Receipt,
    /// The `transfer` to the contract
    pub transfer: Receipt,
}

/// Outcome of a confirmed [`Flows::recover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// Wrapped balance that was pulled out
    pub amount: U256,
    /// The recover transaction
    pub receipt: Receipt,
}

/// End-to-end operations against a deployed sandwich contract.
#[derive(Debug)]
pub struct Flows<'a, C, S> {
    sequencer: &'a Sequencer<C, S>,
    wrapped_asset: Address,
    fee_policy: FeePolicy,
    gas_limit: u64,
}

impl<'a, C, S> Flows<'a, C, S>
where
    C: ChainClient,
    S: TransactionSigner,
{
    /// Creates the flows for `wrapped_asset`.
    pub const fn new(sequencer: &'a Sequencer<C, S>, wrapped_asset: Address) -> Self {
        Self {
            sequencer,
            wrapped_asset,
            fee_policy: FeePolicy::eip1559(),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    /// Sets the fee policy for every transaction the flows send.
    pub const fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    /// Sets the gas limit for contract calls.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// The wrapped asset contract.
    pub const fn wrapped_asset(&self) -> Address {
        self.wrapped_asset
    }

    /// Wrapped asset balance of `holder`.
    pub async fn wrapped_balance(&self, holder: Address) -> Result<U256> {
        let input = IWETH::balanceOfCall { owner: holder }.abi_encode();
        let data = self
            .sequencer
            .client()
            .call(self.wrapped_asset, input.into())
            .await
            .map_err(|source| Error::Rpc { step: "wrapped balance", source })?;
        U256::abi_decode(&data)
            .map_err(|_| Error::UnexpectedReturnData { call: "balanceOf", data })
    }

    /// Wraps `amount` of native balance and transfers it to `contract`.
    ///
    /// The transfer is only built once the wrap is confirmed. A failed wrap leaves nothing to undo.
    pub async fn fund(&self, contract: Address, amount: U256) -> Result<Funding> {
        info!(%contract, %amount, "Wrapping native balance");
        let wrap = self
            .sequencer
            .send_with_value(
                self.wrapped_asset,
                IWETH::depositCall {}.abi_encode().into(),
                amount,
                self.fee_policy,
                self.gas_limit,
            )
            .await?;

        info!(%contract, %amount, "Transferring wrapped balance");
        let transfer = self
            .sequencer
            .send(
                self.wrapped_asset,
                IWETH::transferCall { to: contract, value: amount }.abi_encode().into(),
                self.fee_policy,
                self.gas_limit,
            )
            .await?;

        Ok(Funding { wrap, transfer })
    }

    /// Pulls the contract's whole wrapped balance back to the sender.
    ///
    /// Returns [`Error::NothingToRecover`] without sending anything when the balance is zero.
    pub async fn recover(&self, contract: Address) -> Result<Recovery> {
        let amount = self.wrapped_balance(contract).await?;
        if amount.is_zero() {
            return Err(Error::NothingToRecover { contract });
        }
        debug!(%contract, %amount, "Recovering wrapped balance");

        let payload = encode_recover(opcode::RECOVER, amount)?;
        let receipt = self.send_payload(contract, payload).await?;
        info!(%contract, %amount, tx_hash = %receipt.tx_hash, "Recovered");

        Ok(Recovery { amount, receipt })
    }

    /// Sends a front-run payload to `contract`.
    pub async fn frontrun(&self, contract: Address, frontrun: &Frontrun) -> Result<Receipt> {
        let payload = frontrun.encode(opcode::FRONTRUN)?;
        debug!(%contract, ?frontrun, "Sending front-run");
        self.send_payload(contract, payload).await
    }

    /// Sends the destroy opcode to `contract`.
    pub async fn destroy(&self, contract: Address) -> Result<Receipt> {
        let payload = encode_destroy(opcode::DESTROY)?;
        info!(%contract, "Destroying contract");
        self.send_payload(contract, payload).await
    }

    /// Sends `value` of native balance to `recipient`.
    pub async fn top_up(&self, recipient: Address, value: U256) -> Result<Receipt> {
        info!(%recipient, %value, "Topping up");
        self.sequencer
            .send_with_value(recipient, Bytes::new(), value, self.fee_policy, TRANSFER_GAS_LIMIT)
            .await
    }

    async fn send_payload(&self, contract: Address, payload: Bytes) -> Result<Receipt> {
        self.sequencer.send(contract, payload, self.fee_policy, self.gas_limit).await
    }
}
