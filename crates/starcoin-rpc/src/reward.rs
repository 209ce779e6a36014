//! Block reward extraction from the system account's state set.
//!
//! The reward for block N is settled while block N+1 executes, so it shows
//! up in the `0x1::BlockReward::RewardQueue` resource under block N+1's
//! state root. The queue is field 1 of that resource: a vector of
//! positional structs `[block_number, reward, author, gas_fee{value}]`.
//! Other fields of the resource are not decoded.

use crate::error::{DecodeError, RpcError};
use crate::move_value::{MoveStruct, MoveValue};
use serde::Serialize;
use serde_json::Value;
use starcoin_types::StructTag;

/// Position of the reward vector inside `RewardQueue`.
const QUEUE_FIELD: usize = 1;

/// Reward paid for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReward {
    pub reward: u128,
    pub author: String,
    pub gas_fee: u128,
}

/// One decoded entry of the reward queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardQueueEntry {
    pub block_number: u64,
    pub reward: u128,
    pub author: String,
    pub gas_fee: u128,
}

impl RewardQueueEntry {
    pub fn decode(value: &MoveValue) -> Result<Self, DecodeError> {
        let info = value.as_struct()?;
        Ok(Self {
            block_number: info.field(0)?.as_u64()?,
            reward: info.field(1)?.as_u128()?,
            author: info.field(2)?.as_address()?.to_string(),
            // gas fee is a Token<STC> wrapping a single u128
            gas_fee: info.field(3)?.as_struct()?.field(0)?.as_u128()?,
        })
    }
}

impl From<RewardQueueEntry> for BlockReward {
    fn from(entry: RewardQueueEntry) -> Self {
        Self {
            reward: entry.reward,
            author: entry.author,
            gas_fee: entry.gas_fee,
        }
    }
}

/// Raw reward queue items from a `state.get_account_state_set` result.
fn queue_items(state_set: &Value) -> Result<Vec<MoveValue>, RpcError> {
    let key = StructTag::reward_queue().to_string();
    let resource = state_set
        .get("resources")
        .and_then(|resources| resources.get(&key))
        .ok_or_else(|| RpcError::MissingField {
            context: format!("resources[{}]", key),
        })?;

    // Only the queue field is decoded; sibling fields such as the reward
    // event handle may use encodings this decoder does not model.
    match MoveValue::decode(MoveStruct::raw_field(resource, QUEUE_FIELD)?)? {
        MoveValue::Vector(items) => Ok(items),
        other => Err(DecodeError::Shape {
            expected: "Vector",
            actual: format!("{:?}", other),
        }
        .into()),
    }
}

/// Decode every entry of the reward queue, in queue order.
pub fn reward_queue(state_set: &Value) -> Result<Vec<RewardQueueEntry>, RpcError> {
    queue_items(state_set)?
        .iter()
        .map(|item| RewardQueueEntry::decode(item).map_err(RpcError::from))
        .collect()
}

/// Find the reward for `block_number`.
///
/// Entries are scanned in order and the first match wins. An entry that
/// fails to decode before a match is found aborts the scan.
pub fn find_block_reward(state_set: &Value, block_number: u64) -> Result<BlockReward, RpcError> {
    for item in queue_items(state_set)? {
        let entry = RewardQueueEntry::decode(&item)?;
        if entry.block_number == block_number {
            return Ok(entry.into());
        }
    }
    Err(RpcError::RewardNotFound { block_number })
}
