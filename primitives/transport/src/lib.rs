#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `jito-transport` — HTTP session abstraction
//!
//! This crate defines the seam between the JSON-RPC client and whatever
//! actually moves bytes over the network.
//!
//! ## Core Concepts
//!
//! ### `Connector`
//! Acquires a fresh session. The client calls it once per open/close
//! lifecycle; the returned handle is owned by that client until it is closed.
//!
//! ### `Transport`
//! A live session. It POSTs a prepared [`HttpRequest`] and yields the raw
//! [`HttpResponse`] without interpreting the status code. Sessions can be
//! shared across concurrent calls and closed exactly once.
//!
//! ### `TransportError`
//! Separates failures that happened *before* a response existed (connect,
//! timeout) from failures derived *from* a response (status, body decoding).
//!
//! ## Example
//! ```no_run
//! use transport::{Connector, HttpRequest, Transport, TransportError};
//! use serde_json::json;
//!
//! async fn demo(connector: &dyn Connector) -> Result<(), TransportError> {
//!     let session = connector.connect()?;
//!     let request = HttpRequest::post_json("https://example.com/rpc", json!({"method": "ping"}));
//!     let body = session.send(request).await?.error_for_status()?.json()?;
//!     println!("{}", body);
//!     session.close();
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Canonical error type for all transport implementations.
///
/// `Connect` and `Timeout` mean no HTTP response was obtained. `Status` and
/// `Serialization` mean a response arrived but could not be used as-is.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// Connection refused, DNS resolution failure, TLS handshake failure, or
    /// the connection dropped before a response was read.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status code.
    #[error("HTTP status {status}: {message}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Server-provided body, or the canonical reason phrase when empty.
        message: String,
    },

    /// Failure to serialize the request or decode the response body.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The session was already closed when the request was issued.
    #[error("session is closed")]
    Closed,
}

impl TransportError {
    /// Returns `true` when the failure happened before any HTTP response
    /// was received.
    pub fn is_connection(&self) -> bool {
        matches!(self, TransportError::Connect(_) | TransportError::Timeout(_))
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self { TransportError::Serialization(err.to_string()) }
}

/// A prepared HTTP POST carrying a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Target URL without the query string.
    pub url: String,
    /// Query parameters appended to `url`, in order.
    pub query: Vec<(String, String)>,
    /// Extra request headers. `Content-Type` is always `application/json`.
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Value,
}

impl HttpRequest {
    /// Builds a request with no query parameters and no extra headers.
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self { url: url.into(), query: Vec::new(), headers: Vec::new(), body }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Returns the value of the first header named `name` (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for `status` (may be empty).
    pub reason: String,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self { status, reason: reason.into(), body: body.into() }
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    /// Passes the response through on 2xx, otherwise fails with
    /// [`TransportError::Status`].
    ///
    /// The error message is the response body (cut to
    /// [`BODY_EXCERPT_CHARS`] characters), falling back to the reason phrase
    /// when the body is blank.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let body = self.body.trim();
        let message = if body.is_empty() { self.reason } else { excerpt(body) };
        Err(TransportError::Status { status: self.status, message })
    }

    /// Decodes the body as JSON.
    ///
    /// On failure the error quotes at most [`BODY_EXCERPT_CHARS`] characters
    /// of the body.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| {
            TransportError::Serialization(format!("{} (body: {})", e, excerpt(&self.body)))
        })
    }
}

/// Longest body prefix quoted in a decode error.
pub const BODY_EXCERPT_CHARS: usize = 256;

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

/// A live HTTP session.
///
/// Implementations must tolerate concurrent `send` calls and must reject
/// requests with [`TransportError::Closed`] once `close` has been called.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a single POST and returns the response regardless of status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Releases the session. Calling it more than once is a no-op.
    fn close(&self);

    /// Returns `true` once [`Transport::close`] has been called.
    fn is_closed(&self) -> bool;
}

/// Type alias for a shared, dynamically dispatched session.
pub type DynTransport = Arc<dyn Transport>;

/// Acquires new sessions.
pub trait Connector: Send + Sync {
    /// Opens a new session. No network I/O is required to happen here.
    fn connect(&self) -> Result<DynTransport>;
}
