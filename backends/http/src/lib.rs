#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `jito-http` — HTTP Transport Backend
//!
//! This crate provides the concrete [`reqwest`]-based implementation of the
//! [`transport::Connector`] and [`transport::Transport`] traits.
//!
//! ## Overview
//!
//! - [`HttpConnector`] builds one [`reqwest::Client`] per session, so closing
//!   a session and opening a new one never reuses a pooled connection.
//! - [`HttpTransport`] POSTs JSON bodies and returns the raw status and body.
//!   Status interpretation is left to the caller.
//!
//! ## Example
//! ```no_run
//! use jito_http::HttpConnector;
//! use serde_json::json;
//! use transport::{Connector, HttpRequest, Transport};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let session = HttpConnector::new().connect().unwrap();
//! let request = HttpRequest::post_json(
//!     "https://mainnet.block-engine.jito.wtf/api/v1/bundles",
//!     json!({"jsonrpc": "2.0", "id": 1, "method": "getTipAccounts", "params": []}),
//! );
//! let response = session.send(request).await.unwrap();
//! println!("{} {}", response.status, response.body);
//! # });
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use transport::{Connector, DynTransport, HttpRequest, HttpResponse, Transport, TransportError};

const JSON_MIME: &str = "application/json";

/// Opens [`HttpTransport`] sessions.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    /// Per-request timeout applied to every session built by this connector.
    timeout: Option<Duration>,
}

impl HttpConnector {
    /// Connector with no request timeout.
    pub fn new() -> Self { Self::default() }

    /// Sets the per-request timeout.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use jito_http::HttpConnector;
    ///
    /// let connector = HttpConnector::new().with_timeout(Duration::from_secs(5));
    /// assert_eq!(connector.timeout(), Some(Duration::from_secs(5)));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Option<Duration> { self.timeout }
}

impl Connector for HttpConnector {
    fn connect(&self) -> Result<DynTransport, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("HTTP Transport - Failed to build client: {}", e);
            TransportError::Connect(e.to_string())
        })?;
        logging::trace("HTTP", "→ opened HTTP session");
        Ok(Arc::new(HttpTransport::from_client(client)))
    }
}

/// A live HTTP session backed by a pooled [`reqwest::Client`].
///
/// Cloning the inner client is cheap; concurrent `send` calls share the
/// connection pool. Once closed, every `send` fails with
/// [`TransportError::Closed`].
#[derive(Debug)]
pub struct HttpTransport {
    /// The underlying HTTP client used to perform requests.
    client: reqwest::Client,
    closed: AtomicBool,
}

impl HttpTransport {
    /// Wraps an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client, closed: AtomicBool::new(false) }
    }
}

/// Sorts a [`reqwest::Error`] into the transport taxonomy.
///
/// Anything that failed before a status line was read is a connection
/// failure, except timeouts which get their own variant.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_builder() {
        TransportError::Serialization(err.to_string())
    } else {
        TransportError::Connect(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// POSTs `request` and reads the full body.
    ///
    /// # Errors
    /// - [`TransportError::Closed`] if the session was closed
    /// - [`TransportError::Timeout`] if the configured timeout elapsed
    /// - [`TransportError::Connect`] for DNS, TCP, TLS or body read failures
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        logging::trace("HTTP", &format!("→ POST {}", request.url));

        let mut req = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .json(&request.body);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("HTTP Transport - Request failed: {}", e);
            classify(e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("HTTP Transport - Failed to read body: {}", e);
            classify(e)
        })?;

        logging::trace("HTTP", &format!("← {} ({} bytes)", status, body.len()));
        Ok(HttpResponse::new(status.as_u16(), status.canonical_reason().unwrap_or_default(), body))
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            logging::trace("HTTP", "→ closed HTTP session");
        }
    }

    fn is_closed(&self) -> bool { self.closed.load(Ordering::SeqCst) }
}
