//! Fee and gas configuration for the sando CLI

use clap::Args;
use sando_ops::FeePolicy;

use super::{parse_fee_value, Result, SandoError};

/// Fee configuration arguments
#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Fee Options")]
pub struct FeeArgs {
    /// Send a legacy (type 0) transaction instead of an EIP-1559 one
    #[arg(long = "legacy")]
    pub legacy: bool,

    /// Legacy gas price [default: fetched from the node].
    /// Accepts wei or a unit suffix, e.g. `20gwei`
    #[arg(long = "gas-price", visible_aliases = ["price"])]
    pub gas_price: Option<String>,

    /// EIP-1559 priority fee per gas [default: fetched from the node]
    #[arg(long = "priority-fee", visible_aliases = ["tip"])]
    pub priority_fee: Option<String>,

    /// EIP-1559 max fee per gas [default: twice the gas price plus the priority fee]
    #[arg(long = "max-fee", visible_aliases = ["max-fee-per-gas"])]
    pub max_fee: Option<String>,

    /// Gas limit [default depends on the command]
    #[arg(long = "gas-limit", visible_aliases = ["gas"])]
    pub gas_limit: Option<u64>,
}

impl FeeArgs {
    /// Validates fee arguments for consistency.
    ///
    /// Checks:
    /// - `gas_price` is only set for legacy transactions
    /// - `priority_fee` and `max_fee` are only set for EIP-1559 transactions
    pub fn validate(&self) -> Result<()> {
        if !self.legacy && self.gas_price.is_some() {
            return Err(SandoError::InvalidInput(
                "--gas-price is only valid together with --legacy".to_string(),
            ));
        }
        if self.legacy && (self.priority_fee.is_some() || self.max_fee.is_some()) {
            return Err(SandoError::InvalidInput(
                "--priority-fee and --max-fee are not valid for legacy transactions".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the fee policy these arguments describe.
    pub fn fee_policy(&self) -> Result<FeePolicy> {
        self.validate()?;
        let parse = |value: &Option<String>| value.as_deref().map(parse_fee_value).transpose();

        if self.legacy {
            return Ok(FeePolicy::Legacy { gas_price: parse(&self.gas_price)? });
        }
        Ok(FeePolicy::Eip1559 {
            max_priority_fee_per_gas: parse(&self.priority_fee)?,
            max_fee_per_gas: parse(&self.max_fee)?,
        })
    }

    /// The gas limit, or `default` when none was given.
    pub fn gas_limit_or(&self, default: u64) -> u64 {
        self.gas_limit.unwrap_or(default)
    }
}
