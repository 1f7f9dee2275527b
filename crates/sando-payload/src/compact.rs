use core::fmt;

use alloy_primitives::U256;

use crate::{PayloadError, Result};

/// Four significant bytes of an amount plus the calldata offset the contract stores them at.
///
/// The contract copies the four bytes into the outgoing swap call at `offset`, so the amount ends
/// up shifted left by whatever bytes were dropped. The offset counts from the start of that call,
/// selector included: parameter `i` spans `4 + 32 * i .. 36 + 32 * i`.
///
/// Encoding keeps the highest four non-zero bytes and truncates the rest, so
/// [`CompactAmount::amount`] is never above the encoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactAmount {
    offset: u8,
    four_bytes: u32,
}

impl CompactAmount {
    /// Encoded width in bytes.
    pub const WIDTH: usize = 5;

    /// Highest parameter index whose offset still fits in one byte.
    pub const MAX_PARAM_INDEX: u8 = 6;

    /// Encodes `amount` for the swap parameter at `param_index`.
    pub fn encode(amount: U256, param_index: u8) -> Result<Self> {
        if param_index > Self::MAX_PARAM_INDEX {
            return Err(PayloadError::ParamIndexOutOfRange(param_index));
        }
        let mut shift = 0u8;
        let mut remaining = amount;
        while remaining > U256::from(u32::MAX) {
            remaining >>= 8usize;
            shift += 1;
        }
        Ok(Self { offset: 32 + 32 * param_index - shift, four_bytes: remaining.to::<u32>() })
    }

    /// Reads the five wire bytes back.
    pub fn from_bytes(bytes: [u8; Self::WIDTH]) -> Result<Self> {
        let offset = bytes[0];
        if offset < 4 || (offset - 4) % 32 > 28 || (offset - 4) / 32 > Self::MAX_PARAM_INDEX {
            return Err(PayloadError::InvalidCompactOffset(offset));
        }
        let four_bytes = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        Ok(Self { offset, four_bytes })
    }

    /// The five wire bytes: `offset | four_bytes`.
    pub fn to_bytes(&self) -> [u8; Self::WIDTH] {
        let mut out = [0u8; Self::WIDTH];
        out[0] = self.offset;
        out[1..].copy_from_slice(&self.four_bytes.to_be_bytes());
        out
    }

    /// Calldata offset of the four bytes.
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    /// The four significant bytes.
    pub const fn four_bytes(&self) -> u32 {
        self.four_bytes
    }

    /// Swap parameter the amount lands in.
    pub const fn param_index(&self) -> u8 {
        (self.offset - 4) / 32
    }

    /// Number of low bytes dropped by the encoding.
    pub const fn shift(&self) -> u8 {
        32 + 32 * self.param_index() - self.offset
    }

    /// The amount the contract will actually pass on.
    pub fn amount(&self) -> U256 {
        U256::from(self.four_bytes) << (usize::from(self.shift()) * 8)
    }

    /// Lowers the significant bytes by one, leaving dust behind when the amount is a full
    /// balance that the pool would otherwise round against.
    pub fn decrement(&mut self) {
        self.four_bytes = self.four_bytes.saturating_sub(1);
    }
}

impl fmt::Display for CompactAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (param {}, offset {})", self.amount(), self.param_index(), self.offset)
    }
}
