use std::path::PathBuf;

use alloy_primitives::{Address, Bytes, B256};
use clap::Parser;
use sando_ops::{BytecodeCompiler, Deployer, Huffc, DEFAULT_DEPLOY_GAS_LIMIT, DEFAULT_FACTORY};
use tracing::info;

use crate::common::{load_hex, ChainArgs, FeeArgs, Result, SandoError};

/// Deploy the contract through the metamorphic factory
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Huff source file, compiled with huffc before anything is sent
    #[arg(long = "source", value_name = "PATH", conflicts_with_all = ["bytecode", "bytecode_file"])]
    pub source: Option<PathBuf>,

    /// Precompiled creation bytecode as hex
    #[arg(long = "bytecode", visible_aliases = ["code"], conflicts_with = "bytecode_file")]
    pub bytecode: Option<String>,

    /// File containing precompiled bytecode. If '-' is specified, bytecode is read from stdin
    #[arg(long = "bytecode-file", visible_aliases = ["codefile", "code-file"])]
    pub bytecode_file: Option<String>,

    /// Salt selecting the deployment address
    #[arg(long = "salt", env = "DEPLOY_SALT")]
    pub salt: B256,

    /// Metamorphic factory
    #[arg(long = "factory", env = "FACTORY_ADDRESS", default_value_t = DEFAULT_FACTORY)]
    pub factory: Address,

    /// Calldata the factory passes to the contract once deployed, as hex
    #[arg(long = "init-data", visible_aliases = ["init"])]
    pub init_data: Option<String>,

    /// Path to the huffc executable
    #[arg(long = "huffc", default_value = "huffc")]
    pub huffc: PathBuf,

    // Shared argument groups
    /// Chain configuration
    #[command(flatten)]
    pub chain_args: ChainArgs,

    /// Fee configuration
    #[command(flatten)]
    pub fee_args: FeeArgs,
}

impl Cmd {
    /// Execute the deploy command
    pub async fn run(&self) -> Result<()> {
        let fee_policy = self.fee_args.fee_policy()?;
        let init_data = load_hex(self.init_data.as_deref(), None)?.unwrap_or_default();

        // Step 1: produce the bytecode before touching the chain
        let bytecode = self.bytecode(&Huffc::new(&self.huffc))?;

        // Step 2: deploy
        let sequencer = self.chain_args.sequencer().await?;
        let deployment = Deployer::new(&sequencer, self.factory)
            .with_fee_policy(fee_policy)
            .with_gas_limit(self.fee_args.gas_limit_or(DEFAULT_DEPLOY_GAS_LIMIT))
            .deploy(self.salt, bytecode, init_data)
            .await?;
        info!(address = %deployment.address, "Deployment confirmed");

        println!("Deployed at: {}", deployment.address);
        println!("Transaction: {}", deployment.tx_hash);
        println!("Gas used:    {}", deployment.gas_used);
        Ok(())
    }

    /// Loads or compiles the creation bytecode. Never contacts the chain.
    pub fn bytecode<B: BytecodeCompiler>(&self, compiler: &B) -> Result<Bytes> {
        let loaded = load_hex(self.bytecode.as_deref(), self.bytecode_file.as_deref())?;
        let bytecode = match (loaded, self.source.as_deref()) {
            (Some(bytecode), _) => bytecode,
            (None, Some(source)) => {
                compiler.ensure_available()?;
                let bytecode = compiler.compile(source)?;
                info!(source = %source.display(), size = bytecode.len(), "Compiled contract");
                bytecode
            }
            (None, None) => {
                return Err(SandoError::InvalidInput(
                    "one of --source, --bytecode or --bytecode-file is required".to_string(),
                ))
            }
        };
        if bytecode.is_empty() {
            return Err(sando_ops::Error::EmptyBytecode.into());
        }
        Ok(bytecode)
    }
}
