//! Core types and constants for the Starcoin SDK.
//!
//! This crate provides the value types shared by the RPC client and the
//! command-line tool: account address validation, Move struct tags and the
//! access paths used to look up on-chain resources.

pub mod access_path;
pub mod address;
pub mod constants;
pub mod struct_tag;

pub use access_path::AccessPath;
pub use address::AddressError;
pub use struct_tag::{StructTag, StructTagError};
