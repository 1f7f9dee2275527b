//! Tests for the funding, recovery and control flows.

use alloy_consensus::Transaction;
use alloy_primitives::{address, bytes, Address, Bytes, U256};
use alloy_sol_types::SolCall;
use sando_ops::{
    payload::{encode_recover, opcode, Frontrun},
    test_utils::{test_signer, ChainCall, MockChain, TEST_CHAIN_ID},
    Error, FeePolicy, Flows, LocalSigner, Sequencer, TransactionSigner, IWETH, MAINNET_WETH,
};

const CONTRACT: Address = address!("00000000000000000000000000000000000005a0");
const ONE_ETHER: u64 = 1_000_000_000_000_000_000;

fn sender() -> Address {
    test_signer().address()
}

fn sequencer(chain: &MockChain) -> Sequencer<&MockChain, LocalSigner> {
    Sequencer::new(chain, test_signer(), TEST_CHAIN_ID)
}

#[tokio::test]
async fn test_fund_wraps_then_transfers() {
    let amount = U256::from(ONE_ETHER / 2);
    let chain = MockChain::new().account_balance(sender(), U256::from(ONE_ETHER));
    let sequencer = sequencer(&chain);

    let funding = Flows::new(&sequencer, MAINNET_WETH).fund(CONTRACT, amount).await.unwrap();
    assert!(funding.wrap.success);
    assert!(funding.transfer.success);

    let submitted = chain.submitted();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0].to(), Some(MAINNET_WETH));
    assert_eq!(submitted[0].value(), amount);
    assert_eq!(submitted[0].input(), &Bytes::from(IWETH::depositCall {}.abi_encode()));
    assert_eq!(submitted[1].to(), Some(MAINNET_WETH));
    assert_eq!(submitted[1].value(), U256::ZERO);
    assert_eq!(
        submitted[1].input(),
        &Bytes::from(IWETH::transferCall { to: CONTRACT, value: amount }.abi_encode())
    );

    assert_eq!(chain.wrapped_balance_of(CONTRACT), amount);
    assert_eq!(chain.wrapped_balance_of(sender()), U256::ZERO);
}

#[tokio::test]
async fn test_fund_confirms_wrap_before_building_transfer() {
    let chain = MockChain::new().account_balance(sender(), U256::from(ONE_ETHER));
    let sequencer = sequencer(&chain);

    let funding =
        Flows::new(&sequencer, MAINNET_WETH).fund(CONTRACT, U256::from(1_000)).await.unwrap();

    let calls = chain.calls();
    let wrap_confirmed = calls
        .iter()
        .position(|call| *call == ChainCall::WaitForReceipt(funding.wrap.tx_hash))
        .unwrap();
    let second_nonce_read = calls
        .iter()
        .enumerate()
        .filter(|(_, call)| matches!(call, ChainCall::TransactionCount(_)))
        .map(|(i, _)| i)
        .nth(1)
        .unwrap();
    assert!(wrap_confirmed < second_nonce_read);
}

#[tokio::test]
async fn test_fund_stops_when_wrap_reverts() {
    let chain = MockChain::new();
    let sequencer = sequencer(&chain);

    let err = Flows::new(&sequencer, MAINNET_WETH)
        .fund(CONTRACT, U256::from(ONE_ETHER))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Reverted { .. }));
    assert_eq!(chain.submitted().len(), 1);
}

#[tokio::test]
async fn test_recover_with_zero_balance_sends_nothing() {
    let chain = MockChain::new();
    let sequencer = sequencer(&chain);

    let err = Flows::new(&sequencer, MAINNET_WETH).recover(CONTRACT).await.unwrap_err();

    assert!(matches!(err, Error::NothingToRecover { contract } if contract == CONTRACT));
    assert!(chain.submitted().is_empty());
    assert!(!chain.calls().iter().any(|call| matches!(call, ChainCall::TransactionCount(_))));
}

#[tokio::test]
async fn test_recover_sends_whole_balance() {
    let balance = U256::from(123_456_789u64);
    let chain = MockChain::new().with_wrapped_balance(CONTRACT, balance);
    let sequencer = sequencer(&chain);

    let recovery = Flows::new(&sequencer, MAINNET_WETH).recover(CONTRACT).await.unwrap();

    assert_eq!(recovery.amount, balance);
    let tx = &chain.submitted()[0];
    assert_eq!(tx.to(), Some(CONTRACT));
    assert_eq!(tx.input(), &encode_recover(opcode::RECOVER, balance).unwrap());
    assert_eq!(tx.input().len(), 33);
    assert_eq!(chain.wrapped_balance_of(CONTRACT), U256::ZERO);
    assert_eq!(chain.wrapped_balance_of(sender()), balance);
}

#[tokio::test]
async fn test_frontrun_sends_packed_payload() {
    let chain = MockChain::new();
    let sequencer = sequencer(&chain);
    let frontrun = Frontrun {
        target: address!("e5A7aB09E68B2cd335E2bc39E9591b42d29C3115"),
        sub_op: 55,
        param1: 1,
        sub_op2: 28,
        param2: 2_328_306_436,
    };
    let fees = FeePolicy::Eip1559 {
        max_priority_fee_per_gas: Some(0),
        max_fee_per_gas: Some(50_000_000_000),
    };

    Flows::new(&sequencer, MAINNET_WETH)
        .with_fee_policy(fees)
        .with_gas_limit(250_000)
        .frontrun(CONTRACT, &frontrun)
        .await
        .unwrap();

    let tx = &chain.submitted()[0];
    assert_eq!(
        tx.input(),
        &bytes!("0be5a7ab09e68b2cd335e2bc39e9591b42d29c311537000000011c8ac72304")
    );
    assert_eq!(tx.gas_limit(), 250_000);
    assert_eq!(tx.max_priority_fee_per_gas(), Some(0));
    assert_eq!(tx.max_fee_per_gas(), 50_000_000_000);
}

#[tokio::test]
async fn test_destroy_sends_single_opcode_byte() {
    let chain = MockChain::new();
    let sequencer = sequencer(&chain);

    Flows::new(&sequencer, MAINNET_WETH).destroy(CONTRACT).await.unwrap();

    assert_eq!(chain.submitted()[0].input(), &bytes!("2a"));
}

#[tokio::test]
async fn test_top_up_is_a_plain_transfer() {
    let recipient = address!("00000000000000000000000000000000000000cc");
    let chain = MockChain::new().account_balance(sender(), U256::from(ONE_ETHER));
    let sequencer = sequencer(&chain);

    Flows::new(&sequencer, MAINNET_WETH).top_up(recipient, U256::from(ONE_ETHER)).await.unwrap();

    let tx = &chain.submitted()[0];
    assert!(tx.input().is_empty());
    assert_eq!(tx.gas_limit(), 21_000);
    assert_eq!(chain.balance_of(recipient), U256::from(ONE_ETHER));
}

#[tokio::test]
async fn test_wrapped_balance_rejects_malformed_return_data() {
    let not_a_token = address!("00000000000000000000000000000000000000dd");
    let chain = MockChain::new();
    let sequencer = sequencer(&chain);

    let err = Flows::new(&sequencer, not_a_token).wrapped_balance(CONTRACT).await.unwrap_err();

    assert!(matches!(err, Error::UnexpectedReturnData { call: "balanceOf", .. }));
}
