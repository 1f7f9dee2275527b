//! Test utilities for the sandwich operations.

mod chain;
mod compiler;

pub use chain::*;
pub use compiler::*;

use crate::LocalSigner;

/// Well-known development key (the first Hardhat/Anvil account).
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Chain id used by the mock chain unless overridden.
pub const TEST_CHAIN_ID: u64 = 1;

/// A signer for [`TEST_PRIVATE_KEY`].
pub fn test_signer() -> LocalSigner {
    LocalSigner::from_hex(TEST_PRIVATE_KEY).unwrap()
}
