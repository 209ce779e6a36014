//! CLI command implementations.

use crate::transfer::{self, TransferOptions};
use crate::AppContext;
use serde::Serialize;
use serde_json::Value;
use starcoin_rpc::error::codes;
use starcoin_rpc::{NodeRpc, RpcError};
use starcoin_types::address::parse_address;
use starcoin_types::StructTag;
use std::error::Error;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn connect(ctx: &AppContext) -> std::result::Result<NodeRpc, Box<dyn std::error::Error>> {
    log::debug!("connecting to {}", ctx.config.url);
    Ok(NodeRpc::with_config(ctx.config.clone())?)
}

/// Extra guidance for common node failures.
pub fn error_hint(err: &(dyn Error + 'static)) -> Option<&'static str> {
    let err = err.downcast_ref::<RpcError>()?;
    if err.is_transport() {
        return Some("is the node running and is --url correct?");
    }
    if err.is_not_found() {
        return Some("nothing is stored there at the current chain state");
    }
    match err.rpc_code()? {
        codes::METHOD_NOT_FOUND => Some("the node does not expose this RPC method"),
        codes::INVALID_PARAMS => Some("check the number and types of params"),
        _ => None,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a JSON array of params from the command line.
fn parse_params(raw: Option<&str>) -> std::result::Result<Option<Vec<Value>>, Box<dyn std::error::Error>> {
    match raw {
        None => Ok(None),
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Array(items) => Ok(Some(items)),
            Value::Null => Ok(None),
            other => Err(format!("params must be a JSON array, got {}", other).into()),
        },
    }
}

// ─── Node & Chain ───────────────────────────────────────────────────────────

pub async fn node_info(ctx: &AppContext) -> Result {
    print_json(&connect(ctx)?.node_info().await?)
}

pub async fn node_status(ctx: &AppContext) -> Result {
    print_json(&connect(ctx)?.node_status().await?)
}

pub async fn transaction(ctx: &AppContext, hash: &str) -> Result {
    print_json(&connect(ctx)?.get_transaction(hash).await?)
}

pub async fn transaction_info(ctx: &AppContext, hash: &str) -> Result {
    print_json(&connect(ctx)?.get_transaction_info(hash).await?)
}

pub async fn block(ctx: &AppContext, number: u64) -> Result {
    print_json(&connect(ctx)?.get_block_by_number(number).await?)
}

pub async fn call(ctx: &AppContext, method: &str, params: Option<&str>) -> Result {
    let params = parse_params(params)?;
    print_json(&connect(ctx)?.execute(method, params).await?)
}

// ─── Accounts & State ───────────────────────────────────────────────────────

pub async fn account_exists(ctx: &AppContext, address: &str) -> Result {
    let address = parse_address(address)?;
    let exists = connect(ctx)?.is_account_exist(address).await?;
    println!("{}", exists);
    Ok(())
}

pub async fn sequence(ctx: &AppContext, address: &str) -> Result {
    let address = parse_address(address)?;
    let seq = connect(ctx)?.get_account_sequence(address).await?;
    println!("{}", seq);
    Ok(())
}

pub async fn account_resource(ctx: &AppContext, address: &str) -> Result {
    let address = parse_address(address)?;
    print_json(&connect(ctx)?.get_account_resource(address).await?)
}

pub async fn balance(ctx: &AppContext, address: &str, token: &str) -> Result {
    let address = parse_address(address)?;
    let token: StructTag = token.parse()?;
    let state = connect(ctx)?.get_token_balance(address, token).await?;
    print_json(&state)
}

pub async fn state_set(ctx: &AppContext, address: &str, state_root: &str) -> Result {
    let address = parse_address(address)?;
    print_json(&connect(ctx)?.get_account_state_set(address, state_root).await?)
}

pub async fn block_reward(ctx: &AppContext, number: u64, queue: bool) -> Result {
    let node = connect(ctx)?;
    if queue {
        return print_json(&node.get_reward_queue(number).await?);
    }
    let reward = node.get_block_reward(number).await?;
    println!("Block:   {}", number);
    println!("Reward:  {}", reward.reward);
    println!("Author:  {}", reward.author);
    println!("Gas fee: {}", reward.gas_fee);
    Ok(())
}

// ─── Transfer ───────────────────────────────────────────────────────────────

pub async fn transfer(
    ctx: &AppContext,
    sender: &str,
    receiver: &str,
    receiver_auth_key: &str,
    amount: u128,
    opts: &TransferOptions,
    dry_run: bool,
) -> Result {
    let node = connect(ctx)?;
    let now = node.now_seconds().await?;
    let raw_txn = transfer::peer_to_peer(sender, receiver, receiver_auth_key, amount, now, opts)?;
    log::info!("signing transfer of {} from {} to {}", amount, sender, receiver);

    let signed = node.sign_txn(&raw_txn).await?;
    if dry_run {
        return print_json(&signed);
    }

    print_json(&node.submit(&signed).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_params() {
        assert_eq!(parse_params(None).unwrap(), None);
        assert_eq!(parse_params(Some("null")).unwrap(), None);
        assert_eq!(
            parse_params(Some(r#"["0x1", 5]"#)).unwrap(),
            Some(vec![json!("0x1"), json!(5)])
        );
        assert!(parse_params(Some(r#"{"a": 1}"#)).is_err());
        assert!(parse_params(Some("not json")).is_err());
    }

    #[test]
    fn test_error_hints() {
        let refused: Box<dyn Error> = Box::new(RpcError::HttpStatus {
            method: "node.info".into(),
            url: "http://127.0.0.1:9850".into(),
            status: 502,
            body: String::new(),
        });
        assert!(error_hint(&*refused).unwrap().contains("--url"));

        let missing: Box<dyn Error> = Box::new(RpcError::Rpc {
            method: "no.such".into(),
            code: codes::METHOD_NOT_FOUND,
            message: "Method not found".into(),
            body: String::new(),
        });
        assert!(error_hint(&*missing).is_some());

        let other: Box<dyn Error> = "plain failure".into();
        assert!(error_hint(&*other).is_none());
    }
}
