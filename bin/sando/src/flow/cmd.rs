use alloy_primitives::Address;
use alloy_provider::RootProvider;
use clap::{Args, Parser};
use sando_ops::{Flows, LocalSigner, RpcClient, DEFAULT_GAS_LIMIT, MAINNET_WETH};

use crate::{
    common::{parse_ether_value, ChainArgs, FeeArgs, Result, RpcSequencer},
    encode::FrontrunArgs,
};

/// Arguments shared by every flow command
#[derive(Args, Debug, Clone)]
pub struct FlowArgs {
    /// Wrapped ether contract
    #[arg(long = "weth", env = "WETH_ADDRESS", default_value_t = MAINNET_WETH)]
    pub weth: Address,

    /// Chain configuration
    #[command(flatten)]
    pub chain_args: ChainArgs,

    /// Fee configuration
    #[command(flatten)]
    pub fee_args: FeeArgs,
}

impl FlowArgs {
    /// Configures the flows on top of a connected sequencer.
    pub fn flows<'a>(
        &self,
        sequencer: &'a RpcSequencer,
    ) -> Result<Flows<'a, RpcClient<RootProvider>, LocalSigner>> {
        Ok(Flows::new(sequencer, self.weth)
            .with_fee_policy(self.fee_args.fee_policy()?)
            .with_gas_limit(self.fee_args.gas_limit_or(DEFAULT_GAS_LIMIT)))
    }

    async fn connect(&self) -> Result<RpcSequencer> {
        // Reject bad fee flags before contacting the node
        self.fee_args.validate()?;
        self.chain_args.sequencer().await
    }
}

/// Send a front-run payload to the contract
#[derive(Parser, Debug)]
pub struct FrontrunCmd {
    /// Sandwich contract
    #[arg(long = "contract", env = "SANDWICH_CONTRACT")]
    pub contract: Address,

    /// Payload fields
    #[command(flatten)]
    pub frontrun_args: FrontrunArgs,

    /// Flow configuration
    #[command(flatten)]
    pub flow_args: FlowArgs,
}

impl FrontrunCmd {
    /// Execute the frontrun command
    pub async fn run(&self) -> Result<()> {
        let sequencer = self.flow_args.connect().await?;
        let frontrun = self.frontrun_args.frontrun();
        let receipt = if self.frontrun_args.opcode == sando_ops::payload::opcode::FRONTRUN {
            self.flow_args.flows(&sequencer)?.frontrun(self.contract, &frontrun).await?
        } else {
            // Custom opcode: pack and send through the sequencer directly
            let payload = frontrun.encode(self.frontrun_args.opcode)?;
            let fee_policy = self.flow_args.fee_args.fee_policy()?;
            let gas_limit = self.flow_args.fee_args.gas_limit_or(DEFAULT_GAS_LIMIT);
            sequencer.send(self.contract, payload, fee_policy, gas_limit).await?
        };
        println!("Front-run sent: {} (gas used {})", receipt.tx_hash, receipt.gas_used);
        Ok(())
    }
}

/// Wrap ether and transfer it to the contract
#[derive(Parser, Debug)]
pub struct FundCmd {
    /// Sandwich contract
    #[arg(long = "contract", env = "SANDWICH_CONTRACT")]
    pub contract: Address,

    /// Amount to wrap and transfer, in wei or with a unit suffix (e.g. `0.5ether`)
    #[arg(value_name = "AMOUNT")]
    pub amount: String,

    /// Flow configuration
    #[command(flatten)]
    pub flow_args: FlowArgs,
}

impl FundCmd {
    /// Execute the fund command
    pub async fn run(&self) -> Result<()> {
        let amount = parse_ether_value(&self.amount)?;
        let sequencer = self.flow_args.connect().await?;
        let funding = self.flow_args.flows(&sequencer)?.fund(self.contract, amount).await?;
        println!("Wrapped:     {}", funding.wrap.tx_hash);
        println!("Transferred: {}", funding.transfer.tx_hash);
        Ok(())
    }
}

/// Pull the contract's whole wrapped balance back to the sender
#[derive(Parser, Debug)]
pub struct RecoverCmd {
    /// Sandwich contract
    #[arg(long = "contract", env = "SANDWICH_CONTRACT")]
    pub contract: Address,

    /// Flow configuration
    #[command(flatten)]
    pub flow_args: FlowArgs,
}

impl RecoverCmd {
    /// Execute the recover command
    pub async fn run(&self) -> Result<()> {
        let sequencer = self.flow_args.connect().await?;
        let recovery = self.flow_args.flows(&sequencer)?.recover(self.contract).await?;
        println!("Recovered {} wei in {}", recovery.amount, recovery.receipt.tx_hash);
        Ok(())
    }
}

/// Send the destroy payload to the contract
#[derive(Parser, Debug)]
pub struct DestroyCmd {
    /// Sandwich contract
    #[arg(long = "contract", env = "SANDWICH_CONTRACT")]
    pub contract: Address,

    /// Flow configuration
    #[command(flatten)]
    pub flow_args: FlowArgs,
}

impl DestroyCmd {
    /// Execute the destroy command
    pub async fn run(&self) -> Result<()> {
        let sequencer = self.flow_args.connect().await?;
        let receipt = self.flow_args.flows(&sequencer)?.destroy(self.contract).await?;
        println!("Destroyed in {}", receipt.tx_hash);
        Ok(())
    }
}

/// Send ether to an account, e.g. to fund the deployer
#[derive(Parser, Debug)]
pub struct TopUpCmd {
    /// Account to fund
    #[arg(value_name = "RECIPIENT")]
    pub recipient: Address,

    /// Amount, in wei or with a unit suffix (e.g. `1ether`)
    #[arg(value_name = "AMOUNT")]
    pub value: String,

    /// Flow configuration
    #[command(flatten)]
    pub flow_args: FlowArgs,
}

impl TopUpCmd {
    /// Execute the top-up command
    pub async fn run(&self) -> Result<()> {
        let value = parse_ether_value(&self.value)?;
        let sequencer = self.flow_args.connect().await?;
        let receipt = self.flow_args.flows(&sequencer)?.top_up(self.recipient, value).await?;
        println!("Sent {value} wei to {} in {}", self.recipient, receipt.tx_hash);
        Ok(())
    }
}
