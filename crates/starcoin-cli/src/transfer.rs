//! Peer-to-peer STC transfer requests.
//!
//! The node signs raw transaction requests in a JSON form where the script
//! arguments are Move literals (`0x..` addresses, `x"..."` byte strings,
//! `<n>u128` integers).

use serde::Serialize;
use starcoin_types::address::{to_full_address, AddressError};
use thiserror::Error;

const PEER_TO_PEER: &str = "0x1::TransferScripts::peer_to_peer";
const STC: &str = "0x1::STC::STC";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),

    #[error("invalid receiver auth key: {0}")]
    AuthKey(String),
}

/// Gas and expiry settings.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub chain_id: u8,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub ttl_secs: u64,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            chain_id: 251,
            max_gas_amount: 10_000_000,
            gas_unit_price: 1,
            ttl_secs: 43_200,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScriptCall {
    pub code: String,
    pub type_args: Vec<String>,
    pub args: Vec<String>,
}

/// Raw transaction request accepted by `account.sign_txn_request`.
#[derive(Debug, Serialize)]
pub struct RawTxnRequest {
    pub sender: String,
    pub script: ScriptCall,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub gas_token_code: String,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
    pub modules: Vec<String>,
}

/// Build a `peer_to_peer` STC transfer expiring `ttl_secs` after `now_seconds`.
pub fn peer_to_peer(
    sender: &str,
    receiver: &str,
    receiver_auth_key: &str,
    amount: u128,
    now_seconds: u64,
    opts: &TransferOptions,
) -> Result<RawTxnRequest, TransferError> {
    let sender = to_full_address(sender)?;
    let receiver = to_full_address(receiver)?;

    let auth_key = receiver_auth_key.trim_start_matches("0x");
    if auth_key.is_empty() || hex::decode(auth_key).is_err() {
        return Err(TransferError::AuthKey(receiver_auth_key.to_string()));
    }

    Ok(RawTxnRequest {
        sender,
        script: ScriptCall {
            code: PEER_TO_PEER.to_string(),
            type_args: vec![STC.to_string()],
            args: vec![
                receiver,
                format!("x\"{}\"", auth_key),
                format!("{}u128", amount),
            ],
        },
        max_gas_amount: opts.max_gas_amount,
        gas_unit_price: opts.gas_unit_price,
        gas_token_code: STC.to_string(),
        expiration_timestamp_secs: now_seconds.saturating_add(opts.ttl_secs),
        chain_id: opts.chain_id,
        modules: Vec::new(),
    })
}
