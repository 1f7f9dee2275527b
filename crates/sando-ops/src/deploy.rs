//! Metamorphic deployment of the sandwich contract.
//!
//! The factory deploys a small trampoline with `CREATE2`. The trampoline copies the runtime code of
//! a freshly created implementation contract, so the final address depends only on the factory and
//! the salt. Deploying again under the same salt (after the old contract self-destructed) replaces
//! the code at the same address.

use std::path::Path;

use alloy_primitives::{address, bytes, Address, Bytes, Log, TxHash, B256};
use alloy_sol_types::SolCall;
use tracing::{debug, info, warn};

use crate::{
    BytecodeCompiler, ChainClient, Error, FeePolicy, Result, Sequencer, TransactionSigner,
};

#[allow(missing_docs)]
mod abi {
    alloy_sol_types::sol! {
        interface IMetamorphicContractFactory {
            event Metamorphosed(address metamorphicContract, address newImplementation);

            function deployMetamorphicContract(
                bytes32 salt,
                bytes implementationContractInitializationCode,
                bytes metamorphicContractInitializationCalldata
            ) external payable returns (address metamorphicContractAddress);
        }
    }
}

pub use abi::IMetamorphicContractFactory;

/// The public metamorphic contract factory on Ethereum mainnet.
pub const DEFAULT_FACTORY: Address = address!("00000000e82eb0431756271F0d00CFB143685e7B");

/// Init code the factory deploys with `CREATE2` for every metamorphic contract.
pub const METAMORPHIC_INIT_CODE: Bytes =
    bytes!("5860208158601c335a63aaf10f428752fa158151803b80938091923cf3");

/// Default gas limit for the factory call.
pub const DEFAULT_DEPLOY_GAS_LIMIT: u64 = 5_000_000;

/// Address `factory` will deploy to for `salt`, regardless of the implementation bytecode.
pub fn metamorphic_address(factory: Address, salt: B256) -> Address {
    factory.create2_from_code(salt.0, &METAMORPHIC_INIT_CODE)
}

/// Reads the deployed address out of a factory event.
///
/// The address is the event's first argument: `topics[1]` when it is indexed, otherwise the first
/// data word. Returns `None` if neither holds a left-padded address.
pub fn deployed_address(log: &Log) -> Option<Address> {
    let word = match log.topics().get(1) {
        Some(topic) => *topic,
        None => B256::try_from(log.data.data.get(..32)?).ok()?,
    };
    word[..12].iter().all(|b| *b == 0).then(|| Address::from_word(word))
}

/// Outcome of a confirmed deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// Address reported by the factory
    pub address: Address,
    /// Factory transaction
    pub tx_hash: TxHash,
    /// Gas spent by the factory transaction
    pub gas_used: u64,
}

/// Deploys bytecode through a metamorphic factory.
#[derive(Debug)]
pub struct Deployer<'a, C, S> {
    sequencer: &'a Sequencer<C, S>,
    factory: Address,
    fee_policy: FeePolicy,
    gas_limit: u64,
}

impl<'a, C, S> Deployer<'a, C, S>
where
    C: ChainClient,
    S: TransactionSigner,
{
    /// Creates a deployer that calls `factory` through `sequencer`.
    pub const fn new(sequencer: &'a Sequencer<C, S>, factory: Address) -> Self {
        Self {
            sequencer,
            factory,
            fee_policy: FeePolicy::eip1559(),
            gas_limit: DEFAULT_DEPLOY_GAS_LIMIT,
        }
    }

    /// Sets the fee policy for the factory call.
    pub const fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    /// Sets the gas limit for the factory call.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// The factory address.
    pub const fn factory(&self) -> Address {
        self.factory
    }

    /// Compiles `source` and deploys the result.
    ///
    /// The compiler is checked and run before anything touches the chain, so a missing or failing
    /// compiler never costs a nonce.
    pub async fn deploy_source<B: BytecodeCompiler>(
        &self,
        compiler: &B,
        source: &Path,
        salt: B256,
        init_data: Bytes,
    ) -> Result<Deployment> {
        compiler.ensure_available()?;
        let bytecode = compiler.compile(source)?;
        info!(source = %source.display(), size = bytecode.len(), "Compiled contract");
        self.deploy(salt, bytecode, init_data).await
    }

    /// Deploys `bytecode` at the address derived from `salt`.
    ///
    /// `init_data` is passed through to the factory, which calls the new contract with it once the
    /// code is in place. Deploying over a live contract at the same salt replaces it.
    pub async fn deploy(
        &self,
        salt: B256,
        bytecode: Bytes,
        init_data: Bytes,
    ) -> Result<Deployment> {
        if bytecode.is_empty() {
            return Err(Error::EmptyBytecode);
        }

        let deployer = self.sequencer.address();
        let salt_owner = Address::from_slice(&salt[..20]);
        if salt_owner != deployer && !salt_owner.is_zero() {
            warn!(
                %salt, %salt_owner, %deployer,
                "Salt is not prefixed by the deployer address, the factory may reject it"
            );
        }

        let predicted = metamorphic_address(self.factory, salt);
        debug!(
            factory = %self.factory, %salt, %predicted, bytecode_len = bytecode.len(),
            "Deploying through factory"
        );

        let calldata = IMetamorphicContractFactory::deployMetamorphicContractCall {
            salt,
            implementationContractInitializationCode: bytecode,
            metamorphicContractInitializationCalldata: init_data,
        }
        .abi_encode();

        let receipt = self
            .sequencer
            .send(self.factory, calldata.into(), self.fee_policy, self.gas_limit)
            .await
            .map_err(|err| match err {
                Error::Reverted { tx_hash, gas_used } => Error::DeploymentFailed {
                    reason: format!("factory call reverted after using {gas_used} gas"),
                    tx_hash: Some(tx_hash),
                },
                other => other,
            })?;

        let address = receipt
            .logs
            .iter()
            .find(|log| log.address == self.factory)
            .and_then(deployed_address)
            .ok_or_else(|| Error::DeploymentFailed {
                reason: "receipt carries no deployment event".to_string(),
                tx_hash: Some(receipt.tx_hash),
            })?;

        if address != predicted {
            warn!(%address, %predicted, "Factory reported an unexpected address");
        }
        info!(
            %address, tx_hash = %receipt.tx_hash, gas_used = receipt.gas_used,
            "Contract deployed"
        );

        Ok(Deployment { address, tx_hash: receipt.tx_hash, gas_used: receipt.gas_used })
    }
}
