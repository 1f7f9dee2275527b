//! Offline payload commands
//!
//! `encode` packs a payload exactly as the flows send it, `decode` unpacks one by its opcode.

mod cmd;

pub use cmd::*;
