//! Move struct tags.
//!
//! A struct tag is the fully qualified name of a Move type, e.g.
//! `0x1::Account::Account` or `0x1::Account::Balance<0x1::STC::STC>`.

use crate::address::{parse_address, AddressError};
use crate::constants::{
    ACCOUNT_MODULE, ACCOUNT_STRUCT, BALANCE_STRUCT, BLOCK_REWARD_MODULE, CORE_CODE_ADDRESS,
    REWARD_QUEUE_STRUCT,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructTagError {
    #[error("expected <address>::<module>::<name>, got {0:?}")]
    InvalidFormat(String),

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid address in struct tag: {0}")]
    Address(#[from] AddressError),

    #[error("unbalanced type parameters in {0:?}")]
    UnbalancedGenerics(String),

    #[error("unexpected trailing input: {0:?}")]
    TrailingInput(String),
}

/// Fully qualified Move struct type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub address: String,
    pub module: String,
    pub name: String,
    pub type_params: Vec<StructTag>,
}

impl StructTag {
    pub fn new(address: &str, module: &str, name: &str) -> Self {
        Self {
            address: address.to_string(),
            module: module.to_string(),
            name: name.to_string(),
            type_params: Vec::new(),
        }
    }

    /// Add a generic type parameter.
    pub fn with_param(mut self, param: StructTag) -> Self {
        self.type_params.push(param);
        self
    }

    /// A struct defined in the framework at the core code address.
    pub fn core(module: &str, name: &str) -> Self {
        Self::new(CORE_CODE_ADDRESS, module, name)
    }

    /// `0x1::Account::Account`.
    pub fn account() -> Self {
        Self::core(ACCOUNT_MODULE, ACCOUNT_STRUCT)
    }

    /// `0x1::Account::Balance<token>`.
    pub fn balance(token: StructTag) -> Self {
        Self::core(ACCOUNT_MODULE, BALANCE_STRUCT).with_param(token)
    }

    /// `0x1::BlockReward::RewardQueue`.
    pub fn reward_queue() -> Self {
        Self::core(BLOCK_REWARD_MODULE, REWARD_QUEUE_STRUCT)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if !self.type_params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for StructTag {
    type Err = StructTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, rest) = parse_tag(s, 0)?;
        if !rest.trim().is_empty() {
            return Err(StructTagError::TrailingInput(rest.to_string()));
        }
        Ok(tag)
    }
}

impl Serialize for StructTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StructTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deepest generic nesting accepted by the parser.
const MAX_TYPE_DEPTH: usize = 16;

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one struct tag off the front of `input`, returning the remainder.
fn parse_tag(input: &str, depth: usize) -> Result<(StructTag, &str), StructTagError> {
    if depth > MAX_TYPE_DEPTH {
        return Err(StructTagError::UnbalancedGenerics(input.to_string()));
    }
    let input = input.trim_start();
    let end = input
        .find(|c: char| c == '<' || c == '>' || c == ',')
        .unwrap_or(input.len());
    let head = input[..end].trim();

    let parts: Vec<&str> = head.split("::").collect();
    let [address, module, name] = parts[..] else {
        return Err(StructTagError::InvalidFormat(head.to_string()));
    };
    parse_address(address)?;
    for ident in [module, name] {
        if !is_identifier(ident) {
            return Err(StructTagError::InvalidIdentifier(ident.to_string()));
        }
    }

    let mut tag = StructTag::new(address, module, name);
    let mut rest = &input[end..];

    if let Some(after) = rest.strip_prefix('<') {
        rest = after;
        loop {
            let (param, after) = parse_tag(rest, depth + 1)?;
            tag.type_params.push(param);
            let after = after.trim_start();
            if let Some(next) = after.strip_prefix(',') {
                rest = next;
            } else if let Some(next) = after.strip_prefix('>') {
                rest = next;
                break;
            } else {
                return Err(StructTagError::UnbalancedGenerics(input.to_string()));
            }
        }
    }

    Ok((tag, rest))
}
