//! Starcoin RPC client library.
//!
//! Provides an async JSON-RPC 2.0 client for the Starcoin node: node and
//! chain queries, transaction signing and submission through the node,
//! on-chain state lookups, and block reward extraction from the tagged
//! Move values returned by the state APIs.
//!
//! # Example
//!
//! ```ignore
//! use starcoin_rpc::NodeRpc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let node = NodeRpc::new("http://localhost:9850");
//!     let info = node.node_info().await.unwrap();
//!     println!("Node: {}", info);
//!     let reward = node.get_block_reward(1024).await.unwrap();
//!     println!("Block 1024 paid {} to {}", reward.reward, reward.author);
//! }
//! ```

pub mod error;
pub mod client;
pub mod move_value;
pub mod node;
pub mod reward;

pub use client::{HttpRequest, HttpTransport, RpcClient, RpcConfig, RpcRequest, Transport};
pub use error::{DecodeError, RpcError};
pub use move_value::{MoveStruct, MoveValue};
pub use node::NodeRpc;
pub use reward::{BlockReward, RewardQueueEntry};

