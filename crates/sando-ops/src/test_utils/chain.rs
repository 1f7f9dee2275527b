use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use alloy_consensus::{transaction::SignerRecoverable, Transaction, TxEnvelope};
use alloy_eips::eip2718::Decodable2718;
use alloy_primitives::{Address, Bytes, Log, TxHash, U256};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use sando_payload::{opcode, DecodedValue};

use crate::{
    metamorphic_address, ChainClient, ClientError, IMetamorphicContractFactory, Receipt,
    DEFAULT_FACTORY, IWETH, MAINNET_WETH,
};

use super::TEST_CHAIN_ID;

#[allow(missing_docs)]
mod abi {
    alloy_sol_types::sol! {
        event DeployedAt(address deployed);
    }
}

pub use abi::DeployedAt;

/// A call made against [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCall {
    /// `eth_getBalance`
    Balance(Address),
    /// `eth_getTransactionCount`
    TransactionCount(Address),
    /// `eth_gasPrice`
    GasPrice,
    /// `eth_maxPriorityFeePerGas`
    MaxPriorityFee,
    /// `eth_chainId`
    ChainId,
    /// `eth_call`
    Call {
        /// Callee
        to: Address,
        /// Calldata
        input: Bytes,
    },
    /// `eth_sendRawTransaction`
    SendRawTransaction(Bytes),
    /// Receipt wait
    WaitForReceipt(TxHash),
}

#[derive(Debug, Default)]
struct ChainState {
    nonces: HashMap<Address, u64>,
    balances: HashMap<Address, U256>,
    wrapped: HashMap<Address, U256>,
    code: HashMap<Address, Bytes>,
    receipts: HashMap<TxHash, Receipt>,
    calls: Vec<ChainCall>,
    submitted: Vec<TxEnvelope>,
    reject_next: Option<String>,
    lose_next_receipt: Option<String>,
    reverting: HashSet<Address>,
    factory_emits: Option<Option<Address>>,
}

/// An in-memory chain with a scripted metamorphic factory and wrapped ether.
///
/// Transactions are decoded, checked against the sender's nonce and the chain id, executed
/// immediately and mined into a receipt. Every collaborator call is recorded.
#[derive(Debug)]
pub struct MockChain {
    chain_id: u64,
    factory: Address,
    wrapped_asset: Address,
    gas_price: u128,
    priority_fee: u128,
    state: Mutex<ChainState>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// A chain with the mainnet factory and WETH addresses.
    pub fn new() -> Self {
        Self {
            chain_id: TEST_CHAIN_ID,
            factory: DEFAULT_FACTORY,
            wrapped_asset: MAINNET_WETH,
            gas_price: 20_000_000_000,
            priority_fee: 1_000_000_000,
            state: Mutex::default(),
        }
    }

    /// Sets the chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Sets the factory address.
    pub fn factory(mut self, factory: Address) -> Self {
        self.factory = factory;
        self
    }

    /// Sets the wrapped asset address.
    pub fn wrapped_asset(mut self, wrapped_asset: Address) -> Self {
        self.wrapped_asset = wrapped_asset;
        self
    }

    /// Sets the values returned for `eth_gasPrice` and `eth_maxPriorityFeePerGas`.
    pub fn fees(mut self, gas_price: u128, priority_fee: u128) -> Self {
        self.gas_price = gas_price;
        self.priority_fee = priority_fee;
        self
    }

    /// Sets the next nonce of `address`.
    pub fn account_nonce(self, address: Address, nonce: u64) -> Self {
        self.state.lock().unwrap().nonces.insert(address, nonce);
        self
    }

    /// Sets the native balance of `address`.
    pub fn account_balance(self, address: Address, balance: U256) -> Self {
        self.state.lock().unwrap().balances.insert(address, balance);
        self
    }

    /// Sets the wrapped asset balance of `address`.
    pub fn with_wrapped_balance(self, address: Address, balance: U256) -> Self {
        self.state.lock().unwrap().wrapped.insert(address, balance);
        self
    }

    /// Makes the factory report `address` instead of the real metamorphic address, or emit no
    /// event at all for `None`.
    pub fn factory_emits(self, address: Option<Address>) -> Self {
        self.state.lock().unwrap().factory_emits = Some(address);
        self
    }

    /// Makes the next `eth_sendRawTransaction` fail with `reason`.
    pub fn reject_next_submission(&self, reason: impl Into<String>) {
        self.state.lock().unwrap().reject_next = Some(reason.into());
    }

    /// Makes the next receipt wait fail with `reason`. The transaction itself is still mined.
    pub fn lose_next_receipt(&self, reason: impl Into<String>) {
        self.state.lock().unwrap().lose_next_receipt = Some(reason.into());
    }

    /// Makes every transaction to `address` revert.
    pub fn revert_calls_to(&self, address: Address) {
        self.state.lock().unwrap().reverting.insert(address);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ChainCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Every accepted transaction, in submission order.
    pub fn submitted(&self) -> Vec<TxEnvelope> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Runtime code stored at `address` by the factory.
    pub fn code(&self, address: Address) -> Option<Bytes> {
        self.state.lock().unwrap().code.get(&address).cloned()
    }

    /// Current wrapped asset balance of `address`.
    pub fn wrapped_balance_of(&self, address: Address) -> U256 {
        self.state.lock().unwrap().wrapped.get(&address).copied().unwrap_or_default()
    }

    /// Current native balance of `address`.
    pub fn balance_of(&self, address: Address) -> U256 {
        self.state.lock().unwrap().balances.get(&address).copied().unwrap_or_default()
    }

    fn record(&self, call: ChainCall) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn submit(&self, raw: &Bytes) -> Result<TxHash, ClientError> {
        let mut buf = raw.as_ref();
        let tx = TxEnvelope::decode_2718(&mut buf)
            .map_err(|e| ClientError::Other(format!("invalid transaction: {e}")))?;
        let sender = tx
            .recover_signer()
            .map_err(|e| ClientError::Other(format!("invalid signature: {e}")))?;

        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.reject_next.take() {
            return Err(ClientError::Other(reason));
        }
        if tx.chain_id() != Some(self.chain_id) {
            return Err(ClientError::Other("invalid chain id".to_string()));
        }
        let expected = state.nonces.get(&sender).copied().unwrap_or_default();
        if tx.nonce() != expected {
            return Err(ClientError::Other(format!(
                "nonce mismatch: expected {expected}, got {}",
                tx.nonce()
            )));
        }
        state.nonces.insert(sender, expected + 1);

        let tx_hash = *tx.tx_hash();
        let to = tx.to().unwrap_or_default();
        let (success, logs) = self.execute(&mut state, sender, to, tx.value(), tx.input());
        let gas_used = 21_000 + 16 * tx.input().len() as u64;

        state.receipts.insert(tx_hash, Receipt { tx_hash, success, gas_used, logs });
        state.submitted.push(tx);
        Ok(tx_hash)
    }

    fn execute(
        &self,
        state: &mut ChainState,
        sender: Address,
        to: Address,
        value: U256,
        input: &Bytes,
    ) -> (bool, Vec<Log>) {
        if state.reverting.contains(&to) {
            return (false, Vec::new());
        }
        if !transfer(&mut state.balances, sender, to, value) {
            return (false, Vec::new());
        }

        if to == self.factory {
            let Ok(call) =
                IMetamorphicContractFactory::deployMetamorphicContractCall::abi_decode(input)
            else {
                return (false, Vec::new());
            };
            let deployed = metamorphic_address(self.factory, call.salt);
            state.code.insert(deployed, call.implementationContractInitializationCode);
            let logs = match state.factory_emits {
                Some(None) => Vec::new(),
                Some(Some(reported)) => vec![self.deployed_at(reported)],
                None => vec![self.deployed_at(deployed)],
            };
            return (true, logs);
        }

        if to == self.wrapped_asset {
            let Some(selector) = input.get(..4) else {
                return (false, Vec::new());
            };
            let ok = if selector == IWETH::depositCall::SELECTOR {
                *state.wrapped.entry(sender).or_default() += value;
                true
            } else if selector == IWETH::transferCall::SELECTOR {
                match IWETH::transferCall::abi_decode(input) {
                    Ok(call) => transfer(&mut state.wrapped, sender, call.to, call.value),
                    Err(_) => false,
                }
            } else {
                false
            };
            return (ok, Vec::new());
        }

        match input.first().copied() {
            None => (true, Vec::new()),
            Some(opcode::RECOVER) => {
                let amount = match sando_payload::decode(input).map(|d| d.get("amount")) {
                    Ok(Some(DecodedValue::Uint(amount))) => amount,
                    _ => return (false, Vec::new()),
                };
                (transfer(&mut state.wrapped, to, sender, amount), Vec::new())
            }
            Some(opcode::DESTROY) => {
                state.code.remove(&to);
                (true, Vec::new())
            }
            Some(_) => (sando_payload::decode(input).is_ok(), Vec::new()),
        }
    }

    fn deployed_at(&self, deployed: Address) -> Log {
        Log { address: self.factory, data: DeployedAt { deployed }.encode_log_data() }
    }
}

fn transfer(
    balances: &mut HashMap<Address, U256>,
    from: Address,
    to: Address,
    amount: U256,
) -> bool {
    let available = balances.get(&from).copied().unwrap_or_default();
    if available < amount {
        return false;
    }
    balances.insert(from, available - amount);
    *balances.entry(to).or_default() += amount;
    true
}

impl ChainClient for MockChain {
    async fn balance(&self, address: Address) -> Result<U256, ClientError> {
        self.record(ChainCall::Balance(address));
        Ok(self.balance_of(address))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, ClientError> {
        self.record(ChainCall::TransactionCount(address));
        Ok(self.state.lock().unwrap().nonces.get(&address).copied().unwrap_or_default())
    }

    async fn gas_price(&self) -> Result<u128, ClientError> {
        self.record(ChainCall::GasPrice);
        Ok(self.gas_price)
    }

    async fn max_priority_fee(&self) -> Result<u128, ClientError> {
        self.record(ChainCall::MaxPriorityFee);
        Ok(self.priority_fee)
    }

    async fn chain_id(&self) -> Result<u64, ClientError> {
        self.record(ChainCall::ChainId);
        Ok(self.chain_id)
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, ClientError> {
        self.record(ChainCall::Call { to, input: input.clone() });
        if to == self.wrapped_asset {
            if let Ok(call) = IWETH::balanceOfCall::abi_decode(&input) {
                return Ok(self.wrapped_balance_of(call.owner).abi_encode().into());
            }
        }
        Ok(Bytes::new())
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, ClientError> {
        self.record(ChainCall::SendRawTransaction(raw.clone()));
        self.submit(&raw)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Receipt, ClientError> {
        self.record(ChainCall::WaitForReceipt(tx_hash));
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.lose_next_receipt.take() {
            return Err(ClientError::Other(reason));
        }
        state
            .receipts
            .get(&tx_hash)
            .cloned()
            .ok_or_else(|| ClientError::Other(format!("unknown transaction {tx_hash}")))
    }
}
