//! Tagged Move values as encoded by the node's state APIs.
//!
//! Resource contents come back as externally tagged JSON: each value is a
//! single-key object such as `{"U64": "1024"}` or `{"Vector": [...]}`, and a
//! struct carries its fields positionally as `[label, value]` pairs under
//! `"value"`. Decoding dispatches on the tag only; anything else is a
//! `DecodeError`.

use crate::error::DecodeError;
use serde_json::Value;
use std::str::FromStr;

// =============================================================================
// Tags
// =============================================================================

const TAG_BOOL: &str = "Bool";
const TAG_U8: &str = "U8";
const TAG_U64: &str = "U64";
const TAG_U128: &str = "U128";
const TAG_ADDRESS: &str = "Address";
const TAG_BYTES: &str = "Bytes";
const TAG_VECTOR: &str = "Vector";
const TAG_STRUCT: &str = "Struct";

// =============================================================================
// Values
// =============================================================================

/// A decoded Move value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U64(u64),
    U128(u128),
    Address(String),
    /// Hex-encoded byte vector.
    Bytes(String),
    Vector(Vec<MoveValue>),
    Struct(MoveStruct),
}

/// Struct fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveStruct {
    pub fields: Vec<(String, MoveValue)>,
}

impl MoveValue {
    /// Decode a tagged value such as `{"U128": "500"}`.
    pub fn decode(value: &Value) -> Result<Self, DecodeError> {
        let obj = value.as_object().ok_or_else(|| shape("tagged value", value))?;
        let mut entries = obj.iter();
        let (tag, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => return Err(shape("single-tag object", value)),
        };

        match tag.as_str() {
            TAG_BOOL => payload
                .as_bool()
                .map(MoveValue::Bool)
                .ok_or_else(|| shape("boolean", payload)),
            TAG_U8 => parse_uint(TAG_U8, payload).map(MoveValue::U8),
            TAG_U64 => parse_uint(TAG_U64, payload).map(MoveValue::U64),
            TAG_U128 => parse_uint(TAG_U128, payload).map(MoveValue::U128),
            TAG_ADDRESS => payload
                .as_str()
                .map(|s| MoveValue::Address(s.to_string()))
                .ok_or_else(|| shape("address string", payload)),
            TAG_BYTES => payload
                .as_str()
                .map(|s| MoveValue::Bytes(s.to_string()))
                .ok_or_else(|| shape("hex string", payload)),
            TAG_VECTOR => {
                let items = payload.as_array().ok_or_else(|| shape("array", payload))?;
                items
                    .iter()
                    .map(MoveValue::decode)
                    .collect::<Result<Vec<_>, _>>()
                    .map(MoveValue::Vector)
            }
            TAG_STRUCT => MoveStruct::decode(payload).map(MoveValue::Struct),
            other => Err(DecodeError::UnknownTag(other.to_string())),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            MoveValue::Bool(_) => TAG_BOOL,
            MoveValue::U8(_) => TAG_U8,
            MoveValue::U64(_) => TAG_U64,
            MoveValue::U128(_) => TAG_U128,
            MoveValue::Address(_) => TAG_ADDRESS,
            MoveValue::Bytes(_) => TAG_BYTES,
            MoveValue::Vector(_) => TAG_VECTOR,
            MoveValue::Struct(_) => TAG_STRUCT,
        }
    }

    fn mismatch(&self, expected: &'static str) -> DecodeError {
        DecodeError::Shape {
            expected,
            actual: self.type_name().to_string(),
        }
    }

    pub fn as_u64(&self) -> Result<u64, DecodeError> {
        match self {
            MoveValue::U64(v) => Ok(*v),
            other => Err(other.mismatch(TAG_U64)),
        }
    }

    pub fn as_u128(&self) -> Result<u128, DecodeError> {
        match self {
            MoveValue::U128(v) => Ok(*v),
            other => Err(other.mismatch(TAG_U128)),
        }
    }

    pub fn as_address(&self) -> Result<&str, DecodeError> {
        match self {
            MoveValue::Address(v) => Ok(v),
            other => Err(other.mismatch(TAG_ADDRESS)),
        }
    }

    pub fn as_vector(&self) -> Result<&[MoveValue], DecodeError> {
        match self {
            MoveValue::Vector(v) => Ok(v),
            other => Err(other.mismatch(TAG_VECTOR)),
        }
    }

    pub fn as_struct(&self) -> Result<&MoveStruct, DecodeError> {
        match self {
            MoveValue::Struct(v) => Ok(v),
            other => Err(other.mismatch(TAG_STRUCT)),
        }
    }
}

impl MoveStruct {
    /// Decode a struct body: `{"value": [[label, <tagged value>], ...]}`.
    ///
    /// Other keys on the body (type name, resource flag) are ignored.
    pub fn decode(body: &Value) -> Result<Self, DecodeError> {
        let raw_fields = struct_fields(body)?;
        let mut fields = Vec::with_capacity(raw_fields.len());
        for raw in raw_fields {
            let (label, value) = field_pair(raw)?;
            let label = match label {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            fields.push((label, MoveValue::decode(value)?));
        }
        Ok(Self { fields })
    }

    /// Tagged value of one field of a struct body, without decoding the
    /// other fields.
    pub fn raw_field(body: &Value, index: usize) -> Result<&Value, DecodeError> {
        let raw_fields = struct_fields(body)?;
        let raw = raw_fields.get(index).ok_or(DecodeError::MissingField {
            index,
            len: raw_fields.len(),
        })?;
        field_pair(raw).map(|(_, value)| value)
    }

    /// Field by position.
    pub fn field(&self, index: usize) -> Result<&MoveValue, DecodeError> {
        self.fields
            .get(index)
            .map(|(_, value)| value)
            .ok_or(DecodeError::MissingField {
                index,
                len: self.fields.len(),
            })
    }
}

fn struct_fields(body: &Value) -> Result<&Vec<Value>, DecodeError> {
    body.get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| shape("struct body with a value array", body))
}

fn field_pair(raw: &Value) -> Result<(&Value, &Value), DecodeError> {
    match raw.as_array().map(Vec::as_slice) {
        Some([label, value]) => Ok((label, value)),
        _ => Err(shape("[label, value] pair", raw)),
    }
}

fn shape(expected: &'static str, actual: &Value) -> DecodeError {
    DecodeError::Shape {
        expected,
        actual: actual.to_string(),
    }
}

/// Integers arrive as decimal strings, small ones sometimes as JSON numbers.
fn parse_uint<T>(tag: &'static str, payload: &Value) -> Result<T, DecodeError>
where
    T: FromStr + TryFrom<u64>,
{
    let parsed = match payload {
        Value::String(s) => s.parse::<T>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| T::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| DecodeError::InvalidNumber {
        tag,
        payload: payload.to_string(),
    })
}
