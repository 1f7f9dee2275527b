use alloy_primitives::{Address, B256};
use clap::Parser;
use sando_ops::{metamorphic_address, DEFAULT_FACTORY};

use crate::common::Result;

/// Print the address a salt deploys to, without sending anything
#[derive(Parser, Debug)]
pub struct PredictCmd {
    /// Salt selecting the deployment address
    #[arg(long = "salt", env = "DEPLOY_SALT")]
    pub salt: B256,

    /// Metamorphic factory
    #[arg(long = "factory", env = "FACTORY_ADDRESS", default_value_t = DEFAULT_FACTORY)]
    pub factory: Address,
}

impl PredictCmd {
    /// Execute the predict command
    pub fn run(&self) -> Result<()> {
        println!("{}", metamorphic_address(self.factory, self.salt));
        Ok(())
    }
}
