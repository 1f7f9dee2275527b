use alloy_primitives::{Address, Bytes, B256};
use clap::{Args, Parser, Subcommand};
use sando_ops::{
    payload::{
        self, encode_destroy, encode_recover, opcode, v3_pool_key, Frontrun, V2BackrunMulti,
        V2FrontrunMulti, V3BackrunMulti, V3FrontrunMulti,
    },
    MAINNET_WETH,
};

use crate::common::{load_hex, parse_ether_value, Result, SandoError};

/// Front-run payload fields
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Front-run Options")]
pub struct FrontrunArgs {
    /// Pool or token the contract acts on
    #[arg(long = "target")]
    pub target: Address,

    /// First sub-selector
    #[arg(long = "sub-op")]
    pub sub_op: u8,

    /// Parameter for the first sub-selector
    #[arg(long = "param1")]
    pub param1: u32,

    /// Second sub-selector
    #[arg(long = "sub-op2")]
    pub sub_op2: u8,

    /// Parameter for the second sub-selector
    #[arg(long = "param2")]
    pub param2: u32,

    /// Opcode byte
    #[arg(long = "opcode", default_value_t = opcode::FRONTRUN)]
    pub opcode: u8,
}

impl FrontrunArgs {
    /// The typed front-run arguments.
    pub const fn frontrun(&self) -> Frontrun {
        Frontrun {
            target: self.target,
            sub_op: self.sub_op,
            param1: self.param1,
            sub_op2: self.sub_op2,
            param2: self.param2,
        }
    }
}

/// Multi-call swap payload fields
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Swap Options")]
pub struct SwapArgs {
    /// Pair or pool address
    #[arg(long = "pool")]
    pub pool: Address,

    /// The pool's other token
    #[arg(long = "token")]
    pub token: Address,

    /// Amount going into the pool, in wei or with a unit suffix
    #[arg(long = "amount-in")]
    pub amount_in: String,

    /// Wrapped asset address
    #[arg(long = "weth", env = "WETH_ADDRESS", default_value_t = MAINNET_WETH)]
    pub weth: Address,
}

/// Payloads `encode` can build
#[derive(Subcommand, Debug)]
pub enum Payload {
    /// Front-run call
    Frontrun(FrontrunArgs),
    /// Recover call
    Recover {
        /// Amount to recover, in wei or with a unit suffix
        #[arg(value_name = "AMOUNT")]
        amount: String,

        /// Opcode byte
        #[arg(long = "opcode", default_value_t = opcode::RECOVER)]
        opcode: u8,
    },
    /// Destroy call
    Destroy {
        /// Opcode byte
        #[arg(long = "opcode", default_value_t = opcode::DESTROY)]
        opcode: u8,
    },
    /// Uniswap V2 front-run through the multi-call path
    V2Frontrun {
        /// Swap fields
        #[command(flatten)]
        swap: SwapArgs,

        /// Amount of `--token` taken out of the pair
        #[arg(long = "amount-out")]
        amount_out: String,
    },
    /// Uniswap V2 back-run through the multi-call path
    V2Backrun {
        /// Swap fields
        #[command(flatten)]
        swap: SwapArgs,

        /// Amount of the wrapped asset taken out of the pair
        #[arg(long = "amount-out")]
        amount_out: String,
    },
    /// Uniswap V3 front-run through the multi-call path
    V3Frontrun {
        /// Swap fields
        #[command(flatten)]
        swap: SwapArgs,

        /// Pool fee tier in hundredths of a basis point
        #[arg(long = "fee", default_value_t = 3000)]
        fee: u32,
    },
    /// Uniswap V3 back-run through the multi-call path
    V3Backrun {
        /// Swap fields
        #[command(flatten)]
        swap: SwapArgs,

        /// Pool fee tier in hundredths of a basis point
        #[arg(long = "fee", default_value_t = 3000)]
        fee: u32,
    },
}

impl Payload {
    /// Packs the payload.
    pub fn encode(&self) -> Result<Bytes> {
        let encoded = match self {
            Self::Frontrun(args) => args.frontrun().encode(args.opcode)?,
            Self::Recover { amount, opcode } => {
                encode_recover(*opcode, parse_ether_value(amount)?)?
            }
            Self::Destroy { opcode } => encode_destroy(*opcode)?,
            Self::V2Frontrun { swap, amount_out } => V2FrontrunMulti::new(
                swap.pool,
                swap.weth,
                swap.token,
                parse_ether_value(&swap.amount_in)?,
                parse_ether_value(amount_out)?,
            )?
            .encode()?,
            Self::V2Backrun { swap, amount_out } => V2BackrunMulti::new(
                swap.pool,
                swap.weth,
                swap.token,
                parse_ether_value(&swap.amount_in)?,
                parse_ether_value(amount_out)?,
            )?
            .encode()?,
            Self::V3Frontrun { swap, fee } => V3FrontrunMulti::new(
                swap.pool,
                swap.pool_key(*fee),
                swap.weth,
                swap.token,
                parse_ether_value(&swap.amount_in)?,
            )?
            .encode()?,
            Self::V3Backrun { swap, fee } => V3BackrunMulti::new(
                swap.pool,
                swap.pool_key(*fee),
                swap.weth,
                swap.token,
                parse_ether_value(&swap.amount_in)?,
            )?
            .encode()?,
        };
        Ok(encoded)
    }
}

impl SwapArgs {
    fn pool_key(&self, fee: u32) -> B256 {
        v3_pool_key(self.weth.min(self.token), self.weth.max(self.token), fee)
    }
}

/// Pack a payload and print it as hex
#[derive(Parser, Debug)]
pub struct EncodeCmd {
    /// Payload to pack
    #[command(subcommand)]
    pub payload: Payload,
}

impl EncodeCmd {
    /// Execute the encode command
    pub fn run(&self) -> Result<()> {
        println!("{}", self.payload.encode()?);
        Ok(())
    }
}

/// Unpack a payload and print its fields
#[derive(Parser, Debug)]
pub struct DecodeCmd {
    /// Payload as hex
    #[arg(value_name = "DATA", required_unless_present = "datafile")]
    pub data: Option<String>,

    /// File containing the payload. If '-' is specified, the payload is read from stdin
    #[arg(long = "datafile", visible_aliases = ["data-file"])]
    pub datafile: Option<String>,
}

impl DecodeCmd {
    /// Execute the decode command
    pub fn run(&self) -> Result<()> {
        let data = load_hex(self.data.as_deref(), self.datafile.as_deref())?
            .filter(|data| !data.is_empty())
            .ok_or_else(|| SandoError::InvalidInput("empty payload".to_string()))?;
        println!("{}", payload::decode(&data)?);
        Ok(())
    }
}
