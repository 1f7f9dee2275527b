//! Opcodes understood by the deployed sandwich contract.

/// Front-run action. Followed by the target pool and two `(selector, amount)` pairs.
pub const FRONTRUN: u8 = 11;

/// Sweeps the given amount of the wrapped asset back to the owner.
pub const RECOVER: u8 = 66;

/// Legacy self-destruct. Carries no payload.
pub const DESTROY: u8 = 42;

/// Entry points of the multi-call contract, in jump table order.
///
/// The first calldata byte is a jump destination. Entry `i` sits at `JUMP_TABLE_START + 5 * i`.
pub const ENTRY_POINTS: [&str; 18] = [
    "v2_backrun0",
    "v2_frontrun0",
    "v2_backrun1",
    "v2_frontrun1",
    "v3_backrun0",
    "v3_frontrun0",
    "v3_backrun1",
    "v3_frontrun1",
    "seppuku",
    "recoverEth",
    "recoverWeth",
    "v2_backrun_multi",
    "v2_frontrun_multi",
    "v3_backrun0_multi",
    "v3_frontrun0_multi",
    "v3_backrun1_multi",
    "v3_frontrun1_multi",
    "check_block_number",
];

/// Offset of the first entry in the jump table.
pub const JUMP_TABLE_START: u8 = 0x05;

/// Returns the opcode that dispatches to `entry_point`, if the contract has one.
pub fn jump_dest(entry_point: &str) -> Option<u8> {
    let index = ENTRY_POINTS.iter().position(|name| *name == entry_point)?;
    u8::try_from(index).ok().map(|i| JUMP_TABLE_START + 5 * i)
}

/// Uniswap V2 back-run through the multi-call path.
pub const V2_BACKRUN_MULTI: u8 = 60;

/// Uniswap V2 front-run through the multi-call path.
pub const V2_FRONTRUN_MULTI: u8 = 65;

/// Uniswap V3 back-run when the wrapped asset is token0.
pub const V3_BACKRUN0_MULTI: u8 = 70;

/// Uniswap V3 front-run when the wrapped asset is token0.
pub const V3_FRONTRUN0_MULTI: u8 = 75;

/// Uniswap V3 back-run when the wrapped asset is token1.
pub const V3_BACKRUN1_MULTI: u8 = 80;

/// Uniswap V3 front-run when the wrapped asset is token1.
pub const V3_FRONTRUN1_MULTI: u8 = 85;
