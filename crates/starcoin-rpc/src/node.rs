//! Node RPC client.
//!
//! Typed async methods over the Starcoin node's JSON-RPC interface: node
//! info, chain queries, transaction pool submission, on-chain state and
//! block reward lookup. Results are passed through as JSON unless noted.

use crate::client::{HttpTransport, RpcClient, RpcConfig, Transport};
use crate::error::RpcError;
use crate::reward::{self, BlockReward, RewardQueueEntry};
use serde::Serialize;
use serde_json::{json, Value};
use starcoin_types::constants::GENESIS_ADDRESS;
use starcoin_types::{AccessPath, StructTag};

/// Read an unsigned integer that may be encoded as a JSON number or a
/// decimal string.
fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// =============================================================================
// NodeRpc
// =============================================================================

/// Async RPC client for a Starcoin node.
pub struct NodeRpc<T = HttpTransport> {
    client: RpcClient<T>,
}

impl NodeRpc<HttpTransport> {
    /// Create a node RPC client connected to the given URL.
    pub fn new(url: &str) -> Self {
        Self {
            client: RpcClient::new(url),
        }
    }

    /// Create with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self {
            client: RpcClient::with_config(config)?,
        })
    }
}

impl<T: Transport> NodeRpc<T> {
    /// Wrap an existing RPC client.
    pub fn from_client(client: RpcClient<T>) -> Self {
        Self { client }
    }

    /// Get the underlying RPC client for custom calls.
    pub fn client(&self) -> &RpcClient<T> {
        &self.client
    }

    /// Call any method with positional params.
    pub async fn execute(&self, method: &str, params: Option<Vec<Value>>) -> Result<Value, RpcError> {
        self.client.execute(method, params).await
    }

    // =========================================================================
    // Node
    // =========================================================================

    /// Node information (`node.info`).
    pub async fn node_info(&self) -> Result<Value, RpcError> {
        self.execute("node.info", None).await
    }

    /// Node status (`node.status`).
    pub async fn node_status(&self) -> Result<Value, RpcError> {
        self.execute("node.status", None).await
    }

    /// Node clock in seconds, from `node.info`.
    pub async fn now_seconds(&self) -> Result<u64, RpcError> {
        let info = self.node_info().await?;
        info.get("now_seconds")
            .and_then(value_as_u64)
            .ok_or(RpcError::MissingField {
                context: "node.info now_seconds".into(),
            })
    }

    // =========================================================================
    // Chain
    // =========================================================================

    pub async fn get_transaction(&self, txn_hash: &str) -> Result<Value, RpcError> {
        self.execute("chain.get_transaction", Some(vec![json!(txn_hash)]))
            .await
    }

    pub async fn get_transaction_info(&self, txn_hash: &str) -> Result<Value, RpcError> {
        self.execute("chain.get_transaction_info", Some(vec![json!(txn_hash)]))
            .await
    }

    pub async fn get_block_by_number(&self, number: u64) -> Result<Value, RpcError> {
        self.execute("chain.get_block_by_number", Some(vec![json!(number)]))
            .await
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Submit a signed transaction to the pool.
    ///
    /// Takes whatever `sign_txn` returned (the node answers with hex) and
    /// forwards it unchanged.
    pub async fn submit<S: Serialize + ?Sized>(&self, signed_txn: &S) -> Result<Value, RpcError> {
        let signed_txn = serde_json::to_value(signed_txn)?;
        self.execute("txpool.submit_hex_transaction", Some(vec![signed_txn]))
            .await
    }

    /// Have the node sign a raw transaction request with one of its
    /// unlocked accounts. Returns the signed transaction.
    pub async fn sign_txn<R: Serialize + ?Sized>(&self, raw_txn: &R) -> Result<Value, RpcError> {
        let raw_txn = serde_json::to_value(raw_txn)?;
        self.execute("account.sign_txn_request", Some(vec![raw_txn]))
            .await
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Look up state at an access path; `None` if nothing is stored there.
    pub async fn try_state_get(&self, access_path: &str) -> Result<Option<Value>, RpcError> {
        let val = self
            .execute("state.get", Some(vec![json!(access_path)]))
            .await?;
        Ok(if val.is_null() { None } else { Some(val) })
    }

    /// Look up state at an access path, failing with
    /// `RpcError::StateNotFound` if nothing is stored there.
    pub async fn state_get(&self, access_path: &str) -> Result<Value, RpcError> {
        self.try_state_get(access_path)
            .await?
            .ok_or_else(|| RpcError::StateNotFound {
                access_path: access_path.to_string(),
            })
    }

    /// All code and resources of an account at a given state root.
    pub async fn get_account_state_set(
        &self,
        address: &str,
        state_root: &str,
    ) -> Result<Value, RpcError> {
        self.execute(
            "state.get_account_state_set",
            Some(vec![json!(address), json!(state_root)]),
        )
        .await
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// The `0x1::Account::Account` resource of `addr`.
    pub async fn get_account_resource(&self, addr: &str) -> Result<Value, RpcError> {
        let path = AccessPath::resource(addr, StructTag::account());
        self.state_get(&path.to_string()).await
    }

    /// The `0x1::Account::Balance<0x1::<module>::<name>>` resource of `addr`.
    pub async fn get_account_token(
        &self,
        addr: &str,
        module: &str,
        name: &str,
    ) -> Result<Value, RpcError> {
        self.get_token_balance(addr, StructTag::core(module, name))
            .await
    }

    /// The `0x1::Account::Balance<token>` resource of `addr` for any token type.
    pub async fn get_token_balance(&self, addr: &str, token: StructTag) -> Result<Value, RpcError> {
        let path = AccessPath::resource(addr, StructTag::balance(token));
        self.state_get(&path.to_string()).await
    }

    /// Whether an account resource is published at `addr`.
    pub async fn is_account_exist(&self, addr: &str) -> Result<bool, RpcError> {
        match self.get_account_resource(addr).await {
            Ok(_) => Ok(true),
            Err(RpcError::StateNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Sequence number of `addr`; 0 for an account that does not exist yet.
    pub async fn get_account_sequence(&self, addr: &str) -> Result<u64, RpcError> {
        let resource = match self.get_account_resource(addr).await {
            Ok(resource) => resource,
            Err(RpcError::StateNotFound { .. }) => return Ok(0),
            Err(e) => return Err(e),
        };
        resource
            .get("sequence_number")
            .and_then(value_as_u64)
            .ok_or_else(|| RpcError::MissingField {
                context: format!("sequence_number of account {}", addr),
            })
    }

    // =========================================================================
    // Block Rewards
    // =========================================================================

    /// State root committed by the block after `block_number`.
    async fn reward_state_set(&self, block_number: u64) -> Result<Value, RpcError> {
        let next = block_number.checked_add(1).ok_or_else(|| {
            RpcError::Other(format!("block {} has no successor", block_number))
        })?;
        let block = self.get_block_by_number(next).await?;
        let state_root = block
            .get("header")
            .and_then(|header| header.get("state_root"))
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::MissingField {
                context: format!("header.state_root of block {}", next),
            })?;
        self.get_account_state_set(GENESIS_ADDRESS, state_root).await
    }

    /// Reward, author and gas fee of `block_number`.
    ///
    /// Requires block `block_number + 1` to exist. Fails with
    /// `RpcError::RewardNotFound` if the reward queue has no entry for the
    /// block.
    pub async fn get_block_reward(&self, block_number: u64) -> Result<BlockReward, RpcError> {
        let state_set = self.reward_state_set(block_number).await?;
        reward::find_block_reward(&state_set, block_number)
    }

    /// Full reward queue as of the block after `block_number`.
    pub async fn get_reward_queue(&self, block_number: u64) -> Result<Vec<RewardQueueEntry>, RpcError> {
        let state_set = self.reward_state_set(block_number).await?;
        reward::reward_queue(&state_set)
    }
}
