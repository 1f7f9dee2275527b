use alloy_primitives::{Address, Bytes, U256};

use crate::{Result, DESTROY, FRONTRUN, RECOVER};

/// Packs a front-run call: `opcode | target | sub_op | param1 | sub_op2 | param2`.
///
/// The result is always 31 bytes. Both parameters are written as 4-byte big-endian integers.
pub fn encode_frontrun(
    opcode: u8,
    target: Address,
    sub_op: u8,
    param1: u32,
    sub_op2: u8,
    param2: u32,
) -> Result<Bytes> {
    FRONTRUN.encode(
        opcode,
        &[target.into(), sub_op.into(), param1.into(), sub_op2.into(), param2.into()],
    )
}

/// Packs a recover call: `opcode | amount`, with `amount` as a 32-byte big-endian word.
pub fn encode_recover(opcode: u8, amount: U256) -> Result<Bytes> {
    RECOVER.encode(opcode, &[amount.into()])
}

/// Packs the single-byte destroy call.
pub fn encode_destroy(opcode: u8) -> Result<Bytes> {
    DESTROY.encode(opcode, &[])
}

/// Arguments of a front-run call, for callers that build them up piecemeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontrun {
    /// Pool or token the contract acts on.
    pub target: Address,
    /// First sub-selector.
    pub sub_op: u8,
    /// Parameter for the first sub-selector.
    pub param1: u32,
    /// Second sub-selector.
    pub sub_op2: u8,
    /// Parameter for the second sub-selector.
    pub param2: u32,
}

impl Frontrun {
    /// Packs these arguments behind `opcode`.
    pub fn encode(&self, opcode: u8) -> Result<Bytes> {
        encode_frontrun(opcode, self.target, self.sub_op, self.param1, self.sub_op2, self.param2)
    }
}
