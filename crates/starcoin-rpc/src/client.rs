//! Base JSON-RPC 2.0 HTTP client.
//!
//! `RpcRequest` formats the request envelope, a `Transport` carries it to the
//! node, and `RpcClient::execute()` checks the response and hands back the
//! `result` value. Nothing is retried; timeouts are whatever the transport
//! is configured with.

use crate::error::RpcError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use starcoin_types::constants::DEFAULT_RPC_PORT;
use std::sync::Arc;
use std::time::Duration;

/// Request id sent with every call.
pub const DEFAULT_REQUEST_ID: &str = "sdk-client";

/// Longest slice of an error body kept in `RpcError::HttpStatus`.
const MAX_ERROR_BODY: usize = 500;

/// JSON-RPC 2.0 request envelope.
#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'a str,
    method: &'a str,
    params: Option<&'a [Value]>,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<Value>,
}

/// Configuration for an RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL of the node (e.g., `http://localhost:9850`).
    pub url: String,
    /// Id placed in every request envelope.
    pub request_id: String,
    /// Request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: format!("http://127.0.0.1:{}", DEFAULT_RPC_PORT),
            request_id: DEFAULT_REQUEST_ID.to_string(),
            timeout: None,
        }
    }
}

/// A fully formed HTTP request, ready for a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Parse the body back into JSON.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Builds JSON-RPC request envelopes for a fixed endpoint.
#[derive(Debug, Clone)]
pub struct RpcRequest {
    url: String,
    request_id: String,
    headers: HeaderMap,
}

impl RpcRequest {
    pub fn new(url: &str, request_id: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            url: url.trim_end_matches('/').to_string(),
            request_id: request_id.to_string(),
            headers,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Build the POST request for `method` with positional `params`.
    pub fn prepare(&self, method: &str, params: Option<&[Value]>) -> Result<HttpRequest, RpcError> {
        let envelope = JsonRpcRequest {
            jsonrpc: "2.0",
            id: &self.request_id,
            method,
            params,
        };
        Ok(HttpRequest {
            method: Method::POST,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: serde_json::to_vec(&envelope)?,
        })
    }
}

/// Sends a prepared request and returns the body of a successful response.
///
/// Implementations report connection failures and non-2xx statuses as
/// `RpcError::Transport` / `RpcError::HttpStatus`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: &str, request: HttpRequest) -> Result<String, RpcError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, method: &str, request: HttpRequest) -> Result<String, RpcError> {
        (**self).send(method, request).await
    }
}

/// `Transport` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with an overall request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: &str, request: HttpRequest) -> Result<String, RpcError> {
        let url = request.url;
        let resp = self
            .client
            .request(request.method, &url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| RpcError::Transport {
                method: method.to_string(),
                url: url.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                url,
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        resp.text().await.map_err(|e| RpcError::Transport {
            method: method.to_string(),
            url,
            source: e,
        })
    }
}

/// Async JSON-RPC client for a Starcoin node.
pub struct RpcClient<T = HttpTransport> {
    request: RpcRequest,
    transport: T,
}

impl RpcClient<HttpTransport> {
    /// Create a new client with the given URL.
    pub fn new(url: &str) -> Self {
        Self::with_transport(
            RpcConfig {
                url: url.to_string(),
                ..Default::default()
            },
            HttpTransport::new(),
        )
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        let transport = match config.timeout {
            Some(timeout) => HttpTransport::with_timeout(timeout)?,
            None => HttpTransport::new(),
        };
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> RpcClient<T> {
    /// Create a client that sends through a custom transport.
    pub fn with_transport(config: RpcConfig, transport: T) -> Self {
        Self {
            request: RpcRequest::new(&config.url, &config.request_id),
            transport,
        }
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        self.request.url()
    }

    /// Call a JSON-RPC 2.0 method and return its `result`.
    ///
    /// The returned value may be `Value::Null`; callers decide whether that
    /// means "absent".
    pub async fn execute(&self, method: &str, params: Option<Vec<Value>>) -> Result<Value, RpcError> {
        let req = self.request.prepare(method, params.as_deref())?;
        log::debug!("rpc call {} -> {}", method, req.url);

        let body = self.transport.send(method, req).await?;
        log::trace!("rpc {} response: {}", method, body);

        let parsed = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => serde_json::from_value::<JsonRpcResponse>(Value::Object(map)),
            Ok(_) => {
                return Err(RpcError::MalformedResponse {
                    method: method.to_string(),
                    body,
                })
            }
            Err(e) => Err(e),
        };
        let resp = match parsed {
            Ok(resp) => resp,
            Err(e) => {
                return Err(RpcError::InvalidResponse {
                    method: method.to_string(),
                    source: e,
                    body,
                })
            }
        };

        if let Some(err) = resp.error {
            log::debug!("rpc {} returned error: {}", method, err);
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(RpcError::Rpc {
                method: method.to_string(),
                code,
                message,
                body,
            });
        }

        Ok(resp.result)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned response bodies and records every request.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        responses: Mutex<VecDeque<Result<String, RpcError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn push(&self, body: Value) {
            self.push_raw(&body.to_string());
        }

        pub(crate) fn push_result(&self, result: Value) {
            self.push(serde_json::json!({
                "jsonrpc": "2.0",
                "id": DEFAULT_REQUEST_ID,
                "result": result,
            }));
        }

        pub(crate) fn push_raw(&self, body: &str) {
            self.responses.lock().unwrap().push_back(Ok(body.to_string()));
        }

        pub(crate) fn push_err(&self, err: RpcError) {
            self.responses.lock().unwrap().push_back(Err(err));
        }

        /// JSON bodies of all requests sent so far.
        pub(crate) fn sent(&self) -> Vec<Value> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.body_json().unwrap())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, _method: &str, request: HttpRequest) -> Result<String, RpcError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RpcError::Other("no canned response".into())))
        }
    }

    pub(crate) fn client(transport: &Arc<MockTransport>) -> RpcClient<Arc<MockTransport>> {
        RpcClient::with_transport(
            RpcConfig {
                url: "http://node.test:9850".into(),
                ..Default::default()
            },
            transport.clone(),
        )
    }
}
