//! Access paths for on-chain state lookups.
//!
//! An access path is the key passed to `state.get`:
//! `<address>/<data tag>/<struct tag>`.

use crate::constants::RESOURCE_TAG;
use crate::struct_tag::StructTag;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessPath {
    /// Account address, used verbatim.
    pub address: String,
    pub tag: u8,
    pub struct_tag: StructTag,
}

impl AccessPath {
    /// Path of a Move resource published under `address`.
    pub fn resource(address: &str, struct_tag: StructTag) -> Self {
        Self {
            address: address.to_string(),
            tag: RESOURCE_TAG,
            struct_tag,
        }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.address, self.tag, self.struct_tag)
    }
}

impl Serialize for AccessPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_resource_path() {
        let path = AccessPath::resource("0xaaa", StructTag::account());
        assert_eq!(
            path.to_string(),
            "0xaaa/1/0x00000000000000000000000000000001::Account::Account"
        );
    }

    #[test]
    fn test_balance_resource_path() {
        let token = StructTag::core("STC", "STC");
        let path = AccessPath::resource("0xbbb", StructTag::balance(token));
        assert_eq!(
            path.to_string(),
            "0xbbb/1/0x00000000000000000000000000000001::Account::Balance<0x00000000000000000000000000000001::STC::STC>"
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let path = AccessPath::resource("0x1", StructTag::account());
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, path.to_string());
    }
}
