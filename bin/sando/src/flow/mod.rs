//! Commands that send transactions to a deployed contract
//!
//! Every command reads a fresh nonce and fresh fees, sends one transaction (two for `fund`) and
//! waits for confirmation. Nothing is retried: rerun the command to try again.

mod cmd;

pub use cmd::*;
