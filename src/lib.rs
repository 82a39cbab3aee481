// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jito RPC umbrella crate.
//!
//! Re-exports the public surface of the workspace so applications can depend
//! on a single crate:
//!
//! - [`JitoClient`] and its result/error types from `jito-client`
//! - [`Config`] from `jito-config`
//! - [`HttpConnector`] from `jito-http`
//! - the [`transport`] seam for custom connectors

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

pub use client::{
    ClientError, JitoClient, RpcRequest, RpcResult, SessionGuard, AUTH_HEADER, JSONRPC_VERSION,
    REQUEST_ID, UUID_QUERY_PARAM,
};
pub use config::{Config, ConfigError, DEFAULT_BASE_URL};
pub use http::HttpConnector;
pub use transport;

/// Miscellaneous metadata about the workspace.
pub mod jito_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
