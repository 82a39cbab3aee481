#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `jito-client` — Jito block-engine JSON-RPC client
//!
//! A small async client for the bundle-relay JSON-RPC endpoint.
//!
//! ## Overview
//!
//! - [`JitoClient::generic_call`] builds a JSON-RPC 2.0 envelope, POSTs it,
//!   and returns `{"success": true, "data": <body>}` as an [`RpcResult`].
//! - Named wrappers: [`JitoClient::get_tip_accounts`],
//!   [`JitoClient::get_random_tip_account`], [`JitoClient::send_bundle`],
//!   [`JitoClient::get_bundle_statuses`] and
//!   [`JitoClient::get_inflight_bundle_statuses`].
//! - Failures are never folded into the result: every call returns either an
//!   [`RpcResult`] or a [`ClientError`].
//! - An optional auth UUID, read once from a caller-named environment
//!   variable, is sent as the `uuid` query parameter and the `x-jito-auth`
//!   header.
//!
//! ## Example
//! ```no_run
//! use jito_client::{ClientError, JitoClient};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), ClientError> {
//! let client = JitoClient::new(
//!     "https://mainnet.block-engine.jito.wtf/api/v1/bundles",
//!     Some("JITO_UUID"),
//! );
//! let client = client.session()?;
//!
//! let tip = client.get_random_tip_account().await?;
//! let sent = client.send_bundle(json!([["<base64 tx>"]])).await?;
//! println!("tip {tip}, bundle {}", sent.data);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod session;
mod types;

pub use client::{JitoClient, AUTH_HEADER, UUID_QUERY_PARAM};
pub use error::ClientError;
pub use session::SessionGuard;
pub use types::{RpcRequest, RpcResult, JSONRPC_VERSION, REQUEST_ID};

/// Re-export of the transport seam for callers supplying their own connector.
pub use transport;
