//! Typed builders for the multi-call swap payloads.
//!
//! Which opcode and which swap parameter an amount lands in depend on how the wrapped asset sorts
//! against the other token of the pool, since Uniswap orders `amount0Out`/`amount1Out` by token
//! address.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};

use crate::{
    opcode, CompactAmount, Result, V2_BACKRUN_MULTI, V2_FRONTRUN_MULTI, V3_BACKRUN0_MULTI,
    V3_BACKRUN1_MULTI, V3_FRONTRUN0_MULTI, V3_FRONTRUN1_MULTI,
};

/// Swap parameter of a Uniswap V3 `swap` call that carries the specified amount.
const V3_AMOUNT_PARAM: u8 = 2;

/// Unit the contract multiplies `msg.value` by to recover a wrapped asset amount.
pub const WRAPPED_VALUE_UNIT: U256 = U256::from_limbs([100_000, 0, 0, 0]);

/// Granularity of intermediary token amounts passed through `msg.value`.
pub const INTERMEDIARY_VALUE_UNIT: U256 = U256::from_limbs([10_000_000_000_000, 0, 0, 0]);

/// Rounds a wrapped asset amount down to what survives the `msg.value` encoding.
pub fn quantize_wrapped(amount: U256) -> U256 {
    amount / WRAPPED_VALUE_UNIT * WRAPPED_VALUE_UNIT
}

/// Rounds an intermediary token amount down to what survives the `msg.value` encoding.
pub fn quantize_intermediary(amount: U256) -> U256 {
    amount / INTERMEDIARY_VALUE_UNIT * INTERMEDIARY_VALUE_UNIT
}

/// The `msg.value` that encodes `amount` of the wrapped asset.
pub fn wrapped_call_value(amount: U256) -> U256 {
    amount / WRAPPED_VALUE_UNIT
}

/// Uniswap V3 pool key hash: `keccak256(abi.encode(token0, token1, fee))`.
pub fn v3_pool_key(token0: Address, token1: Address, fee: u32) -> B256 {
    let mut encoded = [0u8; 96];
    encoded[..32].copy_from_slice(token0.into_word().as_slice());
    encoded[32..64].copy_from_slice(token1.into_word().as_slice());
    encoded[64..].copy_from_slice(&U256::from(fee).to_be_bytes::<32>());
    keccak256(encoded)
}

/// Uniswap V2 front-run: wrapped asset in, `output_token` out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V2FrontrunMulti {
    /// Pair address.
    pub pool: Address,
    /// Wrapped asset sent into the pair.
    pub amount_in: CompactAmount,
    /// Output token taken out of the pair.
    pub amount_out: CompactAmount,
}

impl V2FrontrunMulti {
    /// Compacts both amounts for the pair holding `wrapped_asset` and `output_token`.
    pub fn new(
        pool: Address,
        wrapped_asset: Address,
        output_token: Address,
        amount_in: U256,
        amount_out: U256,
    ) -> Result<Self> {
        let out_index = u8::from(wrapped_asset < output_token);
        Ok(Self {
            pool,
            amount_in: CompactAmount::encode(amount_in, 0)?,
            amount_out: CompactAmount::encode(amount_out, out_index)?,
        })
    }

    /// Packs the payload.
    pub fn encode(&self) -> Result<Bytes> {
        V2_FRONTRUN_MULTI.encode(
            opcode::V2_FRONTRUN_MULTI,
            &[self.pool.into(), self.amount_in.into(), self.amount_out.into()],
        )
    }
}

/// Uniswap V2 back-run: `input_token` in, wrapped asset out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V2BackrunMulti {
    /// Pair address.
    pub pool: Address,
    /// Token sold back into the pair.
    pub input_token: Address,
    /// Input token amount.
    pub amount_in: CompactAmount,
    /// Wrapped asset taken out of the pair.
    pub amount_out: CompactAmount,
}

impl V2BackrunMulti {
    /// Compacts both amounts for the pair holding `wrapped_asset` and `input_token`.
    pub fn new(
        pool: Address,
        wrapped_asset: Address,
        input_token: Address,
        amount_in: U256,
        amount_out: U256,
    ) -> Result<Self> {
        let out_index = u8::from(wrapped_asset >= input_token);
        Ok(Self {
            pool,
            input_token,
            amount_in: CompactAmount::encode(amount_in, 1)?,
            amount_out: CompactAmount::encode(amount_out, out_index)?,
        })
    }

    /// Packs the payload.
    pub fn encode(&self) -> Result<Bytes> {
        V2_BACKRUN_MULTI.encode(
            opcode::V2_BACKRUN_MULTI,
            &[
                self.pool.into(),
                self.input_token.into(),
                self.amount_in.into(),
                self.amount_out.into(),
            ],
        )
    }
}

/// Uniswap V3 front-run: wrapped asset in, the other pool token out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V3FrontrunMulti {
    /// Pool address.
    pub pool: Address,
    /// See [`v3_pool_key`].
    pub pool_key: B256,
    /// Wrapped asset sent into the pool.
    pub amount_in: CompactAmount,
    /// Whether the wrapped asset is the pool's token0.
    pub wrapped_is_token0: bool,
}

impl V3FrontrunMulti {
    /// Compacts `amount_in` for the pool holding `wrapped_asset` and `output_token`.
    pub fn new(
        pool: Address,
        pool_key: B256,
        wrapped_asset: Address,
        output_token: Address,
        amount_in: U256,
    ) -> Result<Self> {
        Ok(Self {
            pool,
            pool_key,
            amount_in: CompactAmount::encode(amount_in, V3_AMOUNT_PARAM)?,
            wrapped_is_token0: wrapped_asset < output_token,
        })
    }

    /// Packs the payload behind the token0 or token1 opcode.
    pub fn encode(&self) -> Result<Bytes> {
        let (layout, op) = if self.wrapped_is_token0 {
            (V3_FRONTRUN0_MULTI, opcode::V3_FRONTRUN0_MULTI)
        } else {
            (V3_FRONTRUN1_MULTI, opcode::V3_FRONTRUN1_MULTI)
        };
        layout.encode(op, &[self.pool.into(), self.pool_key.into(), self.amount_in.into()])
    }
}

/// Uniswap V3 back-run: `input_token` in, wrapped asset out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V3BackrunMulti {
    /// Pool address.
    pub pool: Address,
    /// See [`v3_pool_key`].
    pub pool_key: B256,
    /// Input token amount.
    pub amount_in: CompactAmount,
    /// Token sold back into the pool.
    pub input_token: Address,
    /// Whether the wrapped asset is the pool's token0.
    pub wrapped_is_token0: bool,
}

impl V3BackrunMulti {
    /// Compacts `amount_in` for the pool holding `wrapped_asset` and `input_token`.
    pub fn new(
        pool: Address,
        pool_key: B256,
        wrapped_asset: Address,
        input_token: Address,
        amount_in: U256,
    ) -> Result<Self> {
        Ok(Self {
            pool,
            pool_key,
            amount_in: CompactAmount::encode(amount_in, V3_AMOUNT_PARAM)?,
            input_token,
            wrapped_is_token0: wrapped_asset < input_token,
        })
    }

    /// Packs the payload behind the token0 or token1 opcode.
    pub fn encode(&self) -> Result<Bytes> {
        let (layout, op) = if self.wrapped_is_token0 {
            (V3_BACKRUN0_MULTI, opcode::V3_BACKRUN0_MULTI)
        } else {
            (V3_BACKRUN1_MULTI, opcode::V3_BACKRUN1_MULTI)
        };
        layout.encode(
            op,
            &[
                self.pool.into(),
                self.pool_key.into(),
                self.amount_in.into(),
                self.input_token.into(),
            ],
        )
    }
}
