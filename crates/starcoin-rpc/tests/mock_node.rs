//! Client behaviour against a scripted in-memory node.

use async_trait::async_trait;
use serde_json::{json, Value};
use starcoin_rpc::{HttpRequest, NodeRpc, RpcClient, RpcConfig, RpcError, Transport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScriptedNode {
    bodies: Mutex<VecDeque<String>>,
    seen: Mutex<Vec<Value>>,
}

impl ScriptedNode {
    fn reply(&self, body: &str) {
        self.bodies.lock().unwrap().push_back(body.to_string());
    }

    fn reply_result(&self, result: Value) {
        self.reply(&json!({"jsonrpc": "2.0", "id": "sdk-client", "result": result}).to_string());
    }

    fn seen(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedNode {
    async fn send(&self, _method: &str, request: HttpRequest) -> Result<String, RpcError> {
        self.seen.lock().unwrap().push(request.body_json().unwrap());
        self.bodies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RpcError::Other("script exhausted".into()))
    }
}

fn setup() -> (Arc<ScriptedNode>, NodeRpc<Arc<ScriptedNode>>) {
    let scripted = Arc::new(ScriptedNode::default());
    let client = RpcClient::with_transport(
        RpcConfig {
            url: "http://node.test:9850".into(),
            ..Default::default()
        },
        scripted.clone(),
    );
    (scripted, NodeRpc::from_client(client))
}

// ─── 1. Envelope ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_execute_sends_method_and_params_verbatim() {
    let (scripted, node) = setup();
    scripted.reply_result(json!(true));

    let params = vec![json!("a"), json!({"nested": [1, 2]}), json!(null)];
    node.execute("custom.method", Some(params.clone())).await.unwrap();

    let body = &scripted.seen()[0];
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], "sdk-client");
    assert_eq!(body["method"], "custom.method");
    assert_eq!(body["params"], Value::Array(params));
}

// ─── 2. Errors ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_field_always_fails() {
    let (scripted, node) = setup();
    scripted.reply(r#"{"jsonrpc":"2.0","id":"sdk-client","result":{"ok":1},"error":{"code":-1,"message":"nope"}}"#);

    let err = node.node_info().await.unwrap_err();
    assert!(matches!(err, RpcError::Rpc { code: -1, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let (scripted, node) = setup();
    scripted.reply(r#"{"jsonrpc":"2.0","error":{"code":-1"#);

    let err = node.node_status().await.unwrap_err();
    assert!(matches!(err, RpcError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_non_object_body_is_invalid_response() {
    let (scripted, node) = setup();
    scripted.reply("[7]");
    scripted.reply("\"result\"");

    assert!(matches!(
        node.node_info().await,
        Err(RpcError::MalformedResponse { .. })
    ));
    assert!(matches!(
        node.node_info().await,
        Err(RpcError::MalformedResponse { .. })
    ));
}

// ─── 3. Scenarios ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_node_info_scenario() {
    let (scripted, node) = setup();
    scripted.reply(r#"{"jsonrpc":"2.0","id":"sdk-client","result":{"now_seconds": 1000}}"#);

    assert_eq!(node.node_info().await.unwrap(), json!({"now_seconds": 1000}));
}

#[tokio::test]
async fn test_missing_account_scenario() {
    let (scripted, node) = setup();
    scripted.reply_result(Value::Null);
    scripted.reply_result(Value::Null);
    scripted.reply_result(Value::Null);

    let err = node.get_account_resource("0xaaa").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!node.is_account_exist("0xaaa").await.unwrap());
    assert_eq!(node.get_account_sequence("0xaaa").await.unwrap(), 0);

    for body in scripted.seen() {
        assert_eq!(body["method"], "state.get");
        assert_eq!(
            body["params"],
            json!(["0xaaa/1/0x00000000000000000000000000000001::Account::Account"])
        );
    }
}

#[tokio::test]
async fn test_existing_account_with_any_content() {
    let (scripted, node) = setup();
    scripted.reply_result(json!({}));

    assert!(node.is_account_exist("0xaaa").await.unwrap());
}

#[tokio::test]
async fn test_block_reward_scenario() {
    let (scripted, node) = setup();
    scripted.reply_result(json!({"header": {"state_root": "0x5e"}}));
    scripted.reply_result(json!({
        "resources": {
            "0x00000000000000000000000000000001::BlockReward::RewardQueue": {
                "value": [
                    ["reward_number", {"U64": "1024"}],
                    ["infos", {"Vector": [
                        {"Struct": {"value": [
                            ["number", {"U64": "1024"}],
                            ["reward", {"U128": "500"}],
                            ["miner", {"Address": "0xabc"}],
                            ["gas_fees", {"Struct": {"value": [["value", {"U128": "10"}]]}}]
                        ]}}
                    ]}],
                    ["reward_events", {"Struct": {"value": [
                        ["counter", {"U64": "3"}],
                        ["guid", {"Bytes": [1, 2, 3]}]
                    ]}}]
                ]
            }
        }
    }));

    let reward = node.get_block_reward(1024).await.unwrap();
    assert_eq!(
        (reward.reward, reward.author.as_str(), reward.gas_fee),
        (500, "0xabc", 10)
    );
}

#[tokio::test]
async fn test_block_reward_not_in_queue() {
    let (scripted, node) = setup();
    scripted.reply_result(json!({"header": {"state_root": "0x5e"}}));
    scripted.reply_result(json!({
        "resources": {
            "0x00000000000000000000000000000001::BlockReward::RewardQueue": {
                "value": [["reward_number", {"U64": "0"}], ["infos", {"Vector": []}]]
            }
        }
    }));

    let err = node.get_block_reward(1024).await.unwrap_err();
    assert!(matches!(err, RpcError::RewardNotFound { block_number: 1024 }));
}
