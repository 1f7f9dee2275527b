//! Packed calldata for the sandwich contract.
//!
//! The receiving contract has no ABI. It reads an opcode from the first byte of calldata and then
//! slices the remaining bytes at fixed offsets. Every payload is therefore the opcode followed by
//! its fields, each written big-endian in exactly its declared width, with no padding, no length
//! prefix and no version byte.
//!
//! Field order and widths are listed once in the [`LAYOUTS`] table. Both the encoder and the
//! mirror decoder walk that table, so a layout change is a single edit.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod compact;
pub use compact::*;

mod error;
pub use error::*;

mod layout;
pub use layout::*;

mod multi;
pub use multi::*;

pub mod opcode;

mod payload;
pub use payload::*;

mod value;
pub use value::*;
