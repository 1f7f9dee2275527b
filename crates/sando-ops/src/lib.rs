//! Off-chain side of the sandwich contract.
//!
//! This crate deploys the contract through a metamorphic factory, submits raw transactions with a
//! strict nonce and fee discipline, and runs the funding and recovery flows. Chain access, signing
//! and compilation are collaborators behind the [`ChainClient`], [`TransactionSigner`] and
//! [`BytecodeCompiler`] traits.
//!
//! Every flow is sequential: one chain read or write at a time, each awaited before the next one
//! is issued. Nothing is retried automatically. A caller that wants to retry re-enters the flow,
//! which fetches a fresh nonce and fresh fees.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub use sando_payload as payload;

mod client;
pub use client::*;

mod compiler;
pub use compiler::*;

mod deploy;
pub use deploy::*;

mod error;
pub use error::*;

mod flows;
pub use flows::*;

mod rpc;
pub use rpc::*;

mod sequencer;
pub use sequencer::*;

mod signer;
pub use signer::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
