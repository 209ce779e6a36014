//! RPC error types.

use thiserror::Error;

/// JSON-RPC 2.0 standard error codes.
pub mod codes {
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
}

/// Failure while decoding a tagged Move value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown value tag: {0}")]
    UnknownTag(String),

    #[error("expected {expected}, got {actual}")]
    Shape { expected: &'static str, actual: String },

    #[error("invalid {tag} payload: {payload}")]
    InvalidNumber { tag: &'static str, payload: String },

    #[error("missing field {index}: struct has {len} fields")]
    MissingField { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP error calling {method} at {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} calling {method} at {url}: {body}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("parse response as json failed for {method}: {source}, response: {body}")]
    InvalidResponse {
        method: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("response to {method} is not a JSON object: {body}")]
    MalformedResponse { method: String, body: String },

    #[error("RPC error {code} from {method}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
        /// Raw response text.
        body: String,
    },

    #[error("state not found at {access_path}")]
    StateNotFound { access_path: String },

    #[error("no reward entry for block {block_number}")]
    RewardNotFound { block_number: u64 },

    #[error("missing or invalid field: {context}")]
    MissingField { context: String },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl RpcError {
    /// The requested state or record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RpcError::StateNotFound { .. } | RpcError::RewardNotFound { .. }
        )
    }

    /// JSON-RPC error code, if the node answered with an error object.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            RpcError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Connection failure or non-2xx HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport { .. } | RpcError::HttpStatus { .. })
    }
}
