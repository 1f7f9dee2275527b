use std::future::Future;

use alloy_consensus::TxEnvelope;
use alloy_eips::eip2718::Encodable2718;
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;

use crate::{Error, Result};

/// Holds the sending key and turns complete transaction requests into raw signed bytes.
///
/// The key never leaves the implementation.
pub trait TransactionSigner {
    /// Address transactions are sent from.
    fn address(&self) -> Address;

    /// Signs `tx` and returns its EIP-2718 encoding.
    fn sign(&self, tx: TransactionRequest) -> impl Future<Output = Result<Bytes>> + Send;
}

/// Signer backed by an in-memory private key.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    wallet: EthereumWallet,
    address: Address,
}

impl LocalSigner {
    /// Wraps a private key signer.
    pub fn new(signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self { wallet: EthereumWallet::from(signer), address }
    }

    /// Parses a hex private key, with or without `0x`.
    pub fn from_hex(key: &str) -> Result<Self> {
        let signer: PrivateKeySigner =
            key.trim().parse().map_err(|e| Error::Signing(format!("Invalid private key: {e}")))?;
        Ok(Self::new(signer))
    }
}

impl TransactionSigner for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, tx: TransactionRequest) -> Result<Bytes> {
        let envelope: TxEnvelope = tx
            .with_from(self.address)
            .build(&self.wallet)
            .await
            .map_err(|e| Error::Signing(e.to_string()))?;
        Ok(envelope.encoded_2718().into())
    }
}
