//! Command line operator for the sandwich contract.
//!
//! Wires the `sando-ops` flows to a JSON-RPC node and a local key. Every setting can also come
//! from the environment or a `.env` file in the working directory.

mod cmd;
pub use cmd::*;

/// Argument groups, errors and helpers shared by the commands
pub mod common;

/// Deployment and address prediction
pub mod deploy;

/// Offline payload encoding and decoding
pub mod encode;

/// Transaction-sending flows
pub mod flow;
