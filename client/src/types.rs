//! Request envelope and normalized result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version sent in every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Identifier sent in every envelope. Calls are not multiplexed on one
/// connection, so a constant id is enough to satisfy the protocol.
pub const REQUEST_ID: u64 = 1;

/// A JSON-RPC 2.0 request envelope, built once per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: &'static str,
    /// Always [`REQUEST_ID`].
    pub id: u64,
    /// Remote method name.
    pub method: String,
    /// Parameters, passed through without validation.
    pub params: Value,
}

impl RpcRequest {
    /// Creates an envelope for `method`.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id: REQUEST_ID, method: method.into(), params }
    }
}

/// Normalized outcome of a successful call.
///
/// Serializes to `{"success": true, "data": <body>}` where `data` is the
/// decoded response body exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResult {
    /// Always `true`; failures are returned as errors instead.
    pub success: bool,
    /// Decoded response body.
    pub data: Value,
}

impl RpcResult {
    /// Wraps a decoded body.
    pub fn ok(data: Value) -> Self { Self { success: true, data } }

    /// The `result` member of the body, if any.
    pub fn result(&self) -> Option<&Value> { self.data.get("result") }

    /// Consumes the wrapper and returns the body.
    pub fn into_data(self) -> Value { self.data }
}
