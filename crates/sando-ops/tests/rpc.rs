//! Tests for the JSON-RPC chain client against a fake HTTP node.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use alloy_primitives::{address, b256, bytes, hex, Address, B256, U256};
use sando_ops::{deployed_address, ChainClient, ClientError, RpcClient};
use serde_json::{json, Value};
use wiremock::{matchers::method, Mock, MockServer, Request, Respond, ResponseTemplate};

const TX_HASH: B256 = b256!("6b0e1f8c5a2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f");
const BLOCK_HASH: B256 = b256!("00000000000000000000000000000000000000000000000000000000000000b1");
const EVENT_TOPIC: B256 =
    b256!("00000000000000000000000000000000000000000000000000000000000000e1");
const FACTORY: Address = address!("00000000e82eb0431756271F0d00CFB143685e7B");
const DEPLOYED: Address = address!("1111111111111111111111111111111111111111");

/// Answers JSON-RPC requests from a method table, echoing the request id.
///
/// `eth_getTransactionReceipt` fails with HTTP 503 for the first `failing_polls` requests and
/// then returns `null` for the next `pending_polls`.
struct JsonRpc {
    results: HashMap<&'static str, Value>,
    failing_polls: AtomicUsize,
    pending_polls: AtomicUsize,
}

impl JsonRpc {
    fn new(results: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self {
            results: results.into_iter().collect(),
            failing_polls: AtomicUsize::new(0),
            pending_polls: AtomicUsize::new(0),
        }
    }

    fn failing_polls(self, polls: usize) -> Self {
        self.failing_polls.store(polls, Ordering::SeqCst);
        self
    }

    fn pending_polls(self, polls: usize) -> Self {
        self.pending_polls.store(polls, Ordering::SeqCst);
        self
    }
}

impl Respond for JsonRpc {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let id = body["id"].clone();
        let method = body["method"].as_str().unwrap();

        if method == "eth_getTransactionReceipt" && take(&self.failing_polls) {
            return ResponseTemplate::new(503);
        }
        if method == "eth_getTransactionReceipt" && take(&self.pending_polls) {
            return ResponseTemplate::new(200)
                .set_body_json(json!({ "jsonrpc": "2.0", "id": id, "result": null }));
        }

        let response = match self.results.get(method) {
            Some(Value::Object(error)) if error.contains_key("code") => {
                json!({ "jsonrpc": "2.0", "id": id, "error": error })
            }
            Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            None => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {method} not found") }
            }),
        };
        ResponseTemplate::new(200).set_body_json(response)
    }
}

fn take(counter: &AtomicUsize) -> bool {
    counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok()
}

async fn node(responder: JsonRpc) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(responder).mount(&server).await;
    server
}

fn receipt_json(status: &str) -> Value {
    json!({
        "type": "0x2",
        "status": status,
        "cumulativeGasUsed": "0x1e8480",
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "logs": [{
            "address": FACTORY.to_string(),
            "topics": [EVENT_TOPIC.to_string()],
            "data": DEPLOYED.into_word().to_string(),
            "blockHash": BLOCK_HASH.to_string(),
            "blockNumber": "0x10",
            "transactionHash": TX_HASH.to_string(),
            "transactionIndex": "0x0",
            "logIndex": "0x0",
            "removed": false
        }],
        "transactionHash": TX_HASH.to_string(),
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH.to_string(),
        "blockNumber": "0x10",
        "gasUsed": "0x1e8480",
        "effectiveGasPrice": "0x4a817c800",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": FACTORY.to_string(),
        "contractAddress": null
    })
}

fn client(server: &MockServer) -> RpcClient<alloy_provider::RootProvider> {
    RpcClient::connect_http(&server.uri()).unwrap().with_poll_interval(Duration::from_millis(5))
}

#[tokio::test]
async fn test_reads() {
    let server = node(JsonRpc::new([
        ("eth_getBalance", json!("0x64")),
        ("eth_getTransactionCount", json!("0x5")),
        ("eth_gasPrice", json!("0x4a817c800")),
        ("eth_maxPriorityFeePerGas", json!("0x3b9aca00")),
        ("eth_chainId", json!("0x1")),
    ]))
    .await;
    let client = client(&server);
    let holder = address!("00000000000000000000000000000000000000aa");

    assert_eq!(client.balance(holder).await.unwrap(), U256::from(100));
    assert_eq!(client.transaction_count(holder).await.unwrap(), 5);
    assert_eq!(client.gas_price().await.unwrap(), 20_000_000_000);
    assert_eq!(client.max_priority_fee().await.unwrap(), 1_000_000_000);
    assert_eq!(client.chain_id().await.unwrap(), 1);
}

#[tokio::test]
async fn test_call_returns_raw_output() {
    let word = U256::from(42).to_be_bytes::<32>();
    let server = node(JsonRpc::new([("eth_call", json!(hex::encode_prefixed(word)))])).await;

    let output = client(&server).call(FACTORY, bytes!("70a08231")).await.unwrap();

    assert_eq!(output.as_ref(), word.as_slice());
}

#[tokio::test]
async fn test_send_raw_transaction_returns_node_hash() {
    let server = node(JsonRpc::new([("eth_sendRawTransaction", json!(TX_HASH.to_string()))])).await;

    let hash = client(&server).send_raw_transaction(bytes!("02f8")).await.unwrap();

    assert_eq!(hash, TX_HASH);
}

#[tokio::test]
async fn test_node_rejection_is_a_transport_error() {
    let server = node(JsonRpc::new([(
        "eth_sendRawTransaction",
        json!({ "code": -32000, "message": "nonce too low" }),
    )]))
    .await;

    let err = client(&server).send_raw_transaction(bytes!("02f8")).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().contains("nonce too low"));
}

#[tokio::test]
async fn test_wait_for_receipt_polls_until_mined() {
    let server = node(
        JsonRpc::new([("eth_getTransactionReceipt", receipt_json("0x1"))]).pending_polls(3),
    )
    .await;

    let receipt = client(&server).wait_for_receipt(TX_HASH).await.unwrap();

    assert_eq!(receipt.tx_hash, TX_HASH);
    assert!(receipt.success);
    assert_eq!(receipt.gas_used, 2_000_000);
    assert_eq!(receipt.logs.len(), 1);
    assert_eq!(receipt.logs[0].address, FACTORY);
    assert_eq!(deployed_address(&receipt.logs[0]), Some(DEPLOYED));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_wait_for_receipt_survives_transient_errors() {
    let server = node(
        JsonRpc::new([("eth_getTransactionReceipt", receipt_json("0x1"))])
            .failing_polls(2)
            .pending_polls(1),
    )
    .await;

    let receipt = client(&server).with_max_poll_errors(2).wait_for_receipt(TX_HASH).await.unwrap();

    assert_eq!(receipt.tx_hash, TX_HASH);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_wait_for_receipt_gives_up_after_consecutive_errors() {
    let server = node(
        JsonRpc::new([("eth_getTransactionReceipt", receipt_json("0x1"))]).failing_polls(10),
    )
    .await;

    let err = client(&server).with_max_poll_errors(2).wait_for_receipt(TX_HASH).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_failed_receipt_is_reported_as_unsuccessful() {
    let server = node(JsonRpc::new([("eth_getTransactionReceipt", receipt_json("0x0"))])).await;

    let receipt = client(&server).wait_for_receipt(TX_HASH).await.unwrap();

    assert!(!receipt.success);
    assert_eq!(receipt.gas_used, 2_000_000);
}

#[test]
fn test_connect_rejects_malformed_url() {
    assert!(matches!(RpcClient::connect_http("not a url"), Err(ClientError::Other(_))));
}
