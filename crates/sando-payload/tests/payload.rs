//! Wire-format tests for the sandwich contract payloads.
//!
//! Byte offsets asserted here are the ones the deployed contract slices at. A failure in this
//! file means the contract would misread calldata.

use alloy_primitives::{address, hex, Address, U256};
use rstest::rstest;
use sando_payload::{
    decode, encode_destroy, encode_frontrun, encode_recover, opcode, quantize_intermediary,
    quantize_wrapped, v3_pool_key, wrapped_call_value, CompactAmount, DecodedValue, Frontrun,
    PayloadError, V2BackrunMulti, V2FrontrunMulti, V3BackrunMulti, V3FrontrunMulti, Value,
    FRONTRUN, RECOVER,
};

const POOL: Address = address!("e5A7aB09E68B2cd335E2bc39E9591b42d29C3115");
const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
const LOW_TOKEN: Address = address!("0000000000085d4780b73119b644ae5ecd22b376");
const ONE_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

#[test]
fn test_frontrun_matches_known_fixture() {
    let payload = encode_frontrun(11, POOL, 55, 1, 28, 2328306436).unwrap();
    assert_eq!(
        payload.as_ref(),
        hex!("0be5a7ab09e68b2cd335e2bc39e9591b42d29c311537000000011c8ac72304")
    );
}

#[rstest]
#[case(11, POOL, 55, 1, 28, 2328306436)]
#[case(0, Address::ZERO, 0, 0, 0, 0)]
#[case(255, Address::repeat_byte(0xff), 255, u32::MAX, 255, u32::MAX)]
#[case(11, address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), 28, 0x0102_0304, 55, 7)]
fn test_frontrun_offsets(
    #[case] op: u8,
    #[case] target: Address,
    #[case] sub_op: u8,
    #[case] param1: u32,
    #[case] sub_op2: u8,
    #[case] param2: u32,
) {
    let payload = encode_frontrun(op, target, sub_op, param1, sub_op2, param2).unwrap();

    assert_eq!(payload.len(), 31);
    assert_eq!(payload[0], op);
    assert_eq!(&payload[1..21], target.as_slice());
    assert_eq!(payload[21], sub_op);
    assert_eq!(&payload[22..26], &param1.to_be_bytes());
    assert_eq!(payload[26], sub_op2);
    assert_eq!(&payload[27..31], &param2.to_be_bytes());
}

#[test]
fn test_frontrun_struct_matches_free_function() {
    let args = Frontrun { target: POOL, sub_op: 55, param1: 1, sub_op2: 28, param2: 2328306436 };
    assert_eq!(
        args.encode(opcode::FRONTRUN).unwrap(),
        encode_frontrun(11, POOL, 55, 1, 28, 2328306436).unwrap()
    );
}

#[rstest]
#[case(U256::ZERO)]
#[case(U256::from(1u64))]
#[case(U256::from(20_000_000_000_000_000_000u128))]
#[case(U256::MAX)]
fn test_recover_layout(#[case] amount: U256) {
    let payload = encode_recover(opcode::RECOVER, amount).unwrap();

    assert_eq!(payload.len(), 33);
    assert_eq!(payload[0], 66);
    assert_eq!(&payload[1..33], &amount.to_be_bytes::<32>());
}

#[test]
fn test_recover_rejects_two_to_the_256() {
    let mut too_big = vec![0u8; 33];
    too_big[0] = 1;

    let err = RECOVER.encode(opcode::RECOVER, &[Value::uint_be(too_big)]).unwrap_err();
    assert_eq!(err, PayloadError::ValueOutOfRange { field: "amount", width: 32 });
}

#[test]
fn test_frontrun_rejects_param_above_u32() {
    let values: [Value; 5] =
        [POOL.into(), 55u8.into(), (1u64 << 32).into(), 28u8.into(), 1u32.into()];

    let err = FRONTRUN.encode(opcode::FRONTRUN, &values).unwrap_err();
    assert_eq!(err, PayloadError::ValueOutOfRange { field: "param1", width: 4 });
}

#[test]
fn test_frontrun_accepts_u32_max_as_u64() {
    let values: [Value; 5] =
        [POOL.into(), 55u8.into(), u64::from(u32::MAX).into(), 28u8.into(), 1u32.into()];
    assert!(FRONTRUN.encode(opcode::FRONTRUN, &values).is_ok());
}

#[rstest]
#[case(19)]
#[case(21)]
#[case(32)]
#[case(0)]
fn test_frontrun_rejects_bad_address_length(#[case] len: usize) {
    let values: [Value; 5] =
        [Value::address_bytes(vec![0xab; len]), 55u8.into(), 1u32.into(), 28u8.into(), 2u32.into()];

    let err = FRONTRUN.encode(opcode::FRONTRUN, &values).unwrap_err();
    assert_eq!(err, PayloadError::InvalidAddress { field: "target", len });
}

#[test]
fn test_destroy_is_a_single_byte() {
    assert_eq!(encode_destroy(opcode::DESTROY).unwrap().as_ref(), &[42]);
}

#[test]
fn test_encoding_is_deterministic() {
    let a = encode_frontrun(11, POOL, 55, 1, 28, 2328306436).unwrap();
    let b = encode_frontrun(11, POOL, 55, 1, 28, 2328306436).unwrap();
    assert_eq!(a, b);

    let amount = U256::from(123_456_789u64);
    assert_eq!(encode_recover(66, amount).unwrap(), encode_recover(66, amount).unwrap());
}

#[test]
fn test_decoder_reads_fixture_fields() {
    let decoded =
        decode(&hex!("0be5a7ab09e68b2cd335e2bc39e9591b42d29c311537000000011c8ac72304")).unwrap();

    assert_eq!(decoded.layout, "frontrun");
    assert_eq!(decoded.opcode, 11);
    assert_eq!(decoded.get("target"), Some(DecodedValue::Address(POOL)));
    assert_eq!(decoded.get("sub_op"), Some(DecodedValue::Uint(U256::from(55))));
    assert_eq!(decoded.get("param1"), Some(DecodedValue::Uint(U256::from(1))));
    assert_eq!(decoded.get("sub_op2"), Some(DecodedValue::Uint(U256::from(28))));
    assert_eq!(decoded.get("param2"), Some(DecodedValue::Uint(U256::from(2328306436u64))));
}

#[test]
fn test_decoder_reads_recover_amount() {
    let amount = U256::from(20_000_000_000_000_000_000u128);
    let decoded = decode(&encode_recover(66, amount).unwrap()).unwrap();
    assert_eq!(decoded.get("amount"), Some(DecodedValue::Uint(amount)));
}

#[test]
fn test_v2_frontrun_multi_fixture() {
    let payload = V2FrontrunMulti::new(POOL, WETH, USDT, ONE_ETHER, U256::from(2_000_000_000u64))
        .unwrap()
        .encode()
        .unwrap();

    assert_eq!(
        payload.as_ref(),
        hex!("41e5a7ab09e68b2cd335e2bc39e9591b42d29c31151c0de0b6b34077359400")
    );
}

#[test]
fn test_v2_backrun_multi_fixture() {
    let payload = V2BackrunMulti::new(POOL, WETH, USDT, U256::from(2_000_000_000u64), ONE_ETHER)
        .unwrap()
        .encode()
        .unwrap();

    assert_eq!(payload.len(), 51);
    assert_eq!(payload[0], 0x3c);
    assert_eq!(&payload[1..21], POOL.as_slice());
    assert_eq!(&payload[21..41], USDT.as_slice());
    assert_eq!(&payload[41..46], hex!("4077359400"));
    assert_eq!(&payload[46..51], hex!("1c0de0b6b3"));
}

#[rstest]
#[case(USDT, 1, 0)]
#[case(LOW_TOKEN, 0, 1)]
fn test_v2_param_index_follows_token_order(
    #[case] other: Address,
    #[case] frontrun_out_index: u8,
    #[case] backrun_out_index: u8,
) {
    let frontrun = V2FrontrunMulti::new(POOL, WETH, other, ONE_ETHER, ONE_ETHER).unwrap();
    assert_eq!(frontrun.amount_in.param_index(), 0);
    assert_eq!(frontrun.amount_out.param_index(), frontrun_out_index);

    let backrun = V2BackrunMulti::new(POOL, WETH, other, ONE_ETHER, ONE_ETHER).unwrap();
    assert_eq!(backrun.amount_in.param_index(), 1);
    assert_eq!(backrun.amount_out.param_index(), backrun_out_index);
}

#[rstest]
#[case(USDT, opcode::V3_FRONTRUN0_MULTI, opcode::V3_BACKRUN0_MULTI)]
#[case(LOW_TOKEN, opcode::V3_FRONTRUN1_MULTI, opcode::V3_BACKRUN1_MULTI)]
fn test_v3_multi_layout(#[case] other: Address, #[case] frontrun_op: u8, #[case] backrun_op: u8) {
    let pool_key = v3_pool_key(WETH.min(other), WETH.max(other), 3000);
    let amount = CompactAmount::encode(ONE_ETHER, 2).unwrap().to_bytes();

    let frontrun = V3FrontrunMulti::new(POOL, pool_key, WETH, other, ONE_ETHER)
        .unwrap()
        .encode()
        .unwrap();
    assert_eq!(frontrun.len(), 58);
    assert_eq!(frontrun[0], frontrun_op);
    assert_eq!(&frontrun[1..21], POOL.as_slice());
    assert_eq!(&frontrun[21..53], pool_key.as_slice());
    assert_eq!(&frontrun[53..58], &amount);

    let backrun = V3BackrunMulti::new(POOL, pool_key, WETH, other, ONE_ETHER)
        .unwrap()
        .encode()
        .unwrap();
    assert_eq!(backrun.len(), 78);
    assert_eq!(backrun[0], backrun_op);
    assert_eq!(&backrun[21..53], pool_key.as_slice());
    assert_eq!(&backrun[53..58], &amount);
    assert_eq!(&backrun[58..78], other.as_slice());
}

#[test]
fn test_v3_pool_key_depends_on_every_input() {
    let key = v3_pool_key(WETH, USDT, 3000);
    assert_ne!(key, v3_pool_key(USDT, WETH, 3000));
    assert_ne!(key, v3_pool_key(WETH, USDT, 500));
    assert_eq!(key, v3_pool_key(WETH, USDT, 3000));
}

#[test]
fn test_decoder_reads_compact_amounts() {
    let payload = V2BackrunMulti::new(POOL, WETH, USDT, U256::from(2_000_000_000u64), ONE_ETHER)
        .unwrap()
        .encode()
        .unwrap();
    let decoded = decode(&payload).unwrap();

    assert_eq!(decoded.layout, "v2_backrun_multi");
    assert_eq!(decoded.get("input_token"), Some(DecodedValue::Address(USDT)));
    let Some(DecodedValue::Compact(amount_out)) = decoded.get("amount_out") else {
        panic!("amount_out is not a compact amount");
    };
    assert_eq!(amount_out.amount(), U256::from(0x0de0_b6b3u64) << 32);
    assert_eq!(amount_out.param_index(), 0);
}

#[rstest]
#[case(U256::ZERO, U256::ZERO)]
#[case(U256::from(99_999), U256::ZERO)]
#[case(U256::from(1_234_567), U256::from(1_200_000))]
#[case(ONE_ETHER, ONE_ETHER)]
fn test_quantize_wrapped(#[case] amount: U256, #[case] expected: U256) {
    assert_eq!(quantize_wrapped(amount), expected);
}

#[rstest]
#[case(U256::from(9_999_999_999_999u64), U256::ZERO)]
#[case(U256::from(123_456_789_012_345_678u64), U256::from(123_450_000_000_000_000u64))]
fn test_quantize_intermediary(#[case] amount: U256, #[case] expected: U256) {
    assert_eq!(quantize_intermediary(amount), expected);
}

#[test]
fn test_wrapped_call_value_round_trips_quantized_amount() {
    let amount = U256::from(1_234_567_890_123u64);
    assert_eq!(wrapped_call_value(amount), U256::from(12_345_678u64));
    assert_eq!(wrapped_call_value(amount) * U256::from(100_000), quantize_wrapped(amount));
}
