use clap::{Parser, Subcommand};

use crate::common::{LogArgs, Result};

/// Operator tool for the sandwich contract
#[derive(Parser, Debug)]
#[command(name = "sando", infer_subcommands = true, version)]
pub struct MainCmd {
    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the sando CLI
#[derive(Subcommand, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum Command {
    /// Deploy the contract through the metamorphic factory
    Deploy(crate::deploy::Cmd),
    /// Print the address a salt deploys to
    Predict(crate::deploy::PredictCmd),
    /// Pack a payload and print it as hex
    Encode(crate::encode::EncodeCmd),
    /// Unpack a payload and print its fields
    Decode(crate::encode::DecodeCmd),
    /// Send a front-run payload to the contract
    Frontrun(crate::flow::FrontrunCmd),
    /// Wrap ether and transfer it to the contract
    Fund(crate::flow::FundCmd),
    /// Pull the contract's wrapped balance back to the sender
    Recover(crate::flow::RecoverCmd),
    /// Send the destroy payload to the contract
    Destroy(crate::flow::DestroyCmd),
    /// Send ether to an account
    TopUp(crate::flow::TopUpCmd),
}

impl MainCmd {
    /// Execute the main command
    pub async fn run(&self) -> Result<()> {
        self.log_args.init()?;
        match &self.command {
            Command::Deploy(cmd) => cmd.run().await,
            Command::Predict(cmd) => cmd.run(),
            Command::Encode(cmd) => cmd.run(),
            Command::Decode(cmd) => cmd.run(),
            Command::Frontrun(cmd) => cmd.run().await,
            Command::Fund(cmd) => cmd.run().await,
            Command::Recover(cmd) => cmd.run().await,
            Command::Destroy(cmd) => cmd.run().await,
            Command::TopUp(cmd) => cmd.run().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, U256};
    use clap::CommandFactory;
    use sando_ops::{payload::opcode, FeePolicy, DEFAULT_FACTORY, MAINNET_WETH};

    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn parse(args: &[&str]) -> MainCmd {
        MainCmd::try_parse_from(std::iter::once("sando").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        MainCmd::command().debug_assert();
    }

    #[test]
    fn test_parse_predict_defaults_to_public_factory() {
        let cmd = parse(&[
            "predict",
            "--salt",
            "0x30ce0df88936ecd176af29f63ba3f3c8b978bfdaa05c91e9d6dfe501c745a809",
        ]);
        let Command::Predict(predict) = cmd.command else { panic!("expected predict") };
        assert_eq!(predict.factory, DEFAULT_FACTORY);
        assert_eq!(
            predict.salt,
            b256!("30ce0df88936ecd176af29f63ba3f3c8b978bfdaa05c91e9d6dfe501c745a809")
        );
    }

    #[test]
    fn test_parse_encode_frontrun() {
        let cmd = parse(&[
            "encode",
            "frontrun",
            "--target",
            "0xe5A7aB09E68B2cd335E2bc39E9591b42d29C3115",
            "--sub-op",
            "55",
            "--param1",
            "1",
            "--sub-op2",
            "28",
            "--param2",
            "2328306436",
        ]);
        let Command::Encode(encode) = cmd.command else { panic!("expected encode") };
        let crate::encode::Payload::Frontrun(args) = encode.payload else {
            panic!("expected frontrun")
        };
        assert_eq!(args.opcode, opcode::FRONTRUN);
        assert_eq!(args.target, address!("e5A7aB09E68B2cd335E2bc39E9591b42d29C3115"));
        assert_eq!(args.param2, 2_328_306_436);
    }

    #[test]
    fn test_parse_encode_v3_frontrun_defaults() {
        let cmd = parse(&[
            "encode",
            "v3-frontrun",
            "--pool",
            "0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640",
            "--token",
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            "--amount-in",
            "1.5ether",
        ]);
        let Command::Encode(encode) = cmd.command else { panic!("expected encode") };
        let crate::encode::Payload::V3Frontrun { swap, fee } = encode.payload else {
            panic!("expected v3-frontrun")
        };
        assert_eq!(fee, 3000);
        assert_eq!(swap.amount_in, "1.5ether");
        assert_eq!(swap.token, address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"));
    }

    #[test]
    fn test_parse_rejects_oversized_param() {
        let result = MainCmd::try_parse_from([
            "sando",
            "encode",
            "frontrun",
            "--target",
            "0xe5A7aB09E68B2cd335E2bc39E9591b42d29C3115",
            "--sub-op",
            "1",
            "--param1",
            "4294967296",
            "--sub-op2",
            "1",
            "--param2",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_recover_with_fees() {
        let cmd = parse(&[
            "-vvv",
            "recover",
            "--contract",
            "0x00000000000000000000000000000000000005a0",
            "--private-key",
            KEY,
            "--chain-id",
            "1",
            "--priority-fee",
            "0",
            "--max-fee",
            "50gwei",
            "--gas-limit",
            "250000",
        ]);
        assert_eq!(cmd.log_args.verbose, 3);
        let Command::Recover(recover) = cmd.command else { panic!("expected recover") };
        assert_eq!(recover.flow_args.weth, MAINNET_WETH);
        assert_eq!(recover.flow_args.chain_args.chain_id, Some(1));
        assert_eq!(
            recover.flow_args.fee_args.fee_policy().unwrap(),
            FeePolicy::Eip1559 {
                max_priority_fee_per_gas: Some(0),
                max_fee_per_gas: Some(50_000_000_000)
            }
        );
        assert_eq!(recover.flow_args.fee_args.gas_limit, Some(250_000));
    }

    #[test]
    fn test_parse_top_up() {
        let cmd = parse(&[
            "top-up",
            "0x00000000000000000000000000000000000000cc",
            "1ether",
            "--private-key",
            KEY,
            "--legacy",
        ]);
        let Command::TopUp(top_up) = cmd.command else { panic!("expected top-up") };
        assert_eq!(
            crate::common::parse_ether_value(&top_up.value).unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert!(top_up.flow_args.fee_args.legacy);
    }

    #[test]
    fn test_parse_deploy_rejects_source_with_bytecode() {
        let result = MainCmd::try_parse_from([
            "sando",
            "deploy",
            "--salt",
            "0x30ce0df88936ecd176af29f63ba3f3c8b978bfdaa05c91e9d6dfe501c745a809",
            "--source",
            "contracts/sandwich.huff",
            "--bytecode",
            "0x00",
            "--private-key",
            KEY,
        ]);
        assert!(result.is_err());
    }
}
