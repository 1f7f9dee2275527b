use std::time::Duration;

use alloy_provider::RootProvider;
use clap::Args;
use sando_ops::{ChainClient, LocalSigner, RpcClient, Sequencer, TransactionSigner};
use tracing::info;

use super::Result;

/// Sequencer wired to a JSON-RPC node and a local key.
pub type RpcSequencer = Sequencer<RpcClient<RootProvider>, LocalSigner>;

/// Node and signing key configuration
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Chain Options")]
pub struct ChainArgs {
    /// JSON-RPC endpoint of the node
    #[arg(
        long = "rpc",
        visible_aliases = ["rpc-url"],
        env = "RPC_URL",
        default_value = "http://localhost:8545"
    )]
    pub rpc_url: String,

    /// Private key of the sending account, as hex
    #[arg(
        long = "private-key",
        visible_aliases = ["key"],
        env = "DEPLOY_KEY",
        hide_env_values = true
    )]
    pub private_key: String,

    /// Chain id to sign for [default: fetched from the node]
    #[arg(long = "chain-id", env = "CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Interval between receipt polls, in milliseconds
    #[arg(long = "poll-interval", value_name = "MS", default_value_t = 1000)]
    pub poll_interval: u64,

    /// Consecutive failed receipt polls tolerated before giving up
    #[arg(long = "max-poll-errors", default_value_t = sando_ops::DEFAULT_MAX_POLL_ERRORS)]
    pub max_poll_errors: u32,
}

impl ChainArgs {
    /// Connects to the node and loads the signing key.
    ///
    /// The key is parsed before the node is contacted, so a bad key fails without network access.
    pub async fn sequencer(&self) -> Result<RpcSequencer> {
        let signer = LocalSigner::from_hex(&self.private_key)?;
        let client = RpcClient::connect_http(&self.rpc_url)?
            .with_poll_interval(Duration::from_millis(self.poll_interval))
            .with_max_poll_errors(self.max_poll_errors);
        let chain_id = match self.chain_id {
            Some(chain_id) => chain_id,
            None => client.chain_id().await?,
        };
        info!(rpc = %self.rpc_url, chain_id, sender = %signer.address(), "Connected");
        Ok(Sequencer::new(client, signer, chain_id))
    }
}
