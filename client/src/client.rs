//! The block-engine client.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use config::Config;
use http::HttpConnector;
use rand::seq::IndexedRandom;
use serde_json::{json, Value};
use transport::{Connector, DynTransport, HttpRequest, Transport};

use crate::error::ClientError;
use crate::session::{SessionGuard, SessionState};
use crate::types::{RpcRequest, RpcResult};

/// Query parameter carrying the auth UUID.
pub const UUID_QUERY_PARAM: &str = "uuid";

/// Header carrying the auth UUID.
pub const AUTH_HEADER: &str = "x-jito-auth";

/// Async JSON-RPC client for a Jito block engine.
///
/// All calls take `&self` and may run concurrently. The session is acquired
/// by [`JitoClient::open`], by [`JitoClient::session`], or lazily by the first
/// call, and released by [`JitoClient::close`], by dropping the
/// [`SessionGuard`], or by dropping the client.
pub struct JitoClient {
    base_url: String,
    uuid_var: Option<String>,
    uuid: Option<String>,
    connector: Arc<dyn Connector>,
    state: RwLock<SessionState>,
}

impl fmt::Debug for JitoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JitoClient")
            .field("base_url", &self.base_url)
            .field("uuid_var", &self.uuid_var)
            .field("uuid", &self.uuid.as_ref().map(|_| "<redacted>"))
            .field("connector", &"<dyn Connector>")
            .field("open", &self.is_open())
            .finish()
    }
}

/// Looks up the auth UUID. Unset and empty variables both resolve to `None`.
fn resolve_uuid(
    uuid_var: Option<&str>,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> Option<String> {
    uuid_var.and_then(lookup).filter(|value| !value.is_empty())
}

/// Picks one string out of `data.result`.
///
/// Every entry is checked before the pick, so a list holding any non-string
/// entry is rejected no matter which entry would have been chosen.
fn choose_tip_account(data: &Value) -> Result<String, ClientError> {
    let accounts = data
        .get("result")
        .ok_or_else(|| ClientError::unexpected_response("response has no `result` field"))?
        .as_array()
        .ok_or_else(|| ClientError::unexpected_response("`result` is not an array"))?
        .iter()
        .map(|account| {
            account.as_str().ok_or_else(|| {
                ClientError::unexpected_response(format!("tip account is not a string: {account}"))
            })
        })
        .collect::<Result<Vec<&str>, _>>()?;

    accounts
        .choose(&mut rand::rng())
        .map(|account| account.to_string())
        .ok_or_else(|| ClientError::unexpected_response("tip account list is empty"))
}

fn bundle_id_params<S: AsRef<str>>(bundle_ids: &[S]) -> Value {
    let ids: Vec<&str> = bundle_ids.iter().map(AsRef::as_ref).collect();
    json!([ids])
}

impl JitoClient {
    /// Creates a client for `base_url` using the default HTTP backend.
    ///
    /// When `uuid_var` is given, that environment variable is read once, here.
    /// No network activity happens until the first call.
    pub fn new(base_url: impl Into<String>, uuid_var: Option<&str>) -> Self {
        Self::with_connector(base_url, uuid_var, Arc::new(HttpConnector::new()))
    }

    /// Creates a client that acquires sessions from `connector`.
    pub fn with_connector(
        base_url: impl Into<String>,
        uuid_var: Option<&str>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let uuid = resolve_uuid(uuid_var, |name| std::env::var(name).ok());
        Self {
            base_url: base_url.into(),
            uuid_var: uuid_var.map(str::to_string),
            uuid,
            connector,
            state: RwLock::new(SessionState::Idle),
        }
    }

    /// Creates a client from the `[endpoint]` section of a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        let mut connector = HttpConnector::new();
        if let Some(timeout) = config.endpoint.timeout() {
            connector = connector.with_timeout(timeout);
        }
        Self::with_connector(
            config.endpoint.base_url.clone(),
            config.endpoint.uuid_var.as_deref(),
            Arc::new(connector),
        )
    }

    /// Overrides the auth UUID with an explicit value.
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into()).filter(|value: &String| !value.is_empty());
        self
    }

    /// The endpoint every call is POSTed to.
    pub fn base_url(&self) -> &str { &self.base_url }

    /// Name of the environment variable the UUID was read from.
    pub fn uuid_var(&self) -> Option<&str> { self.uuid_var.as_deref() }

    /// The resolved auth UUID.
    pub fn uuid(&self) -> Option<&str> { self.uuid.as_deref() }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` while a live session is held.
    pub fn is_open(&self) -> bool {
        matches!(&*self.read_state(), SessionState::Open(session) if !session.is_closed())
    }

    /// Acquires a session unless one is already live.
    ///
    /// After [`JitoClient::close`] this acquires a brand-new session; the
    /// closed one is never reused.
    pub fn open(&self) -> Result<&Self, ClientError> {
        let mut state = self.write_state();
        if let SessionState::Open(session) = &*state {
            if !session.is_closed() {
                return Ok(self);
            }
        }
        let session = self.connector.connect()?;
        tracing::debug!(url = %self.base_url, "opened block-engine session");
        *state = SessionState::Open(session);
        Ok(self)
    }

    /// Opens the client and returns a guard that closes it when dropped.
    pub fn session(&self) -> Result<SessionGuard<'_>, ClientError> {
        self.open()?;
        Ok(SessionGuard::new(self))
    }

    /// Releases the session. Safe to call any number of times.
    pub fn close(&self) {
        let released = self.write_state().release();
        if let Some(session) = released {
            session.close();
            tracing::debug!(url = %self.base_url, "closed block-engine session");
        }
    }

    /// Returns the live session, opening one lazily if the client was never
    /// opened.
    fn acquire(&self) -> Result<DynTransport, ClientError> {
        match &*self.read_state() {
            SessionState::Open(session) => return Ok(session.clone()),
            SessionState::Closed => return Err(ClientError::SessionClosed),
            SessionState::Idle => {}
        }

        let mut state = self.write_state();
        match &*state {
            SessionState::Open(session) => Ok(session.clone()),
            SessionState::Closed => Err(ClientError::SessionClosed),
            SessionState::Idle => {
                let session = self.connector.connect()?;
                *state = SessionState::Open(session.clone());
                Ok(session)
            }
        }
    }

    fn build_request(&self, envelope: &RpcRequest) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_value(envelope)
            .map_err(|e| ClientError::InvalidRequest(format!("cannot encode envelope: {e}")))?;
        let mut request = HttpRequest::post_json(self.base_url.as_str(), body);
        if let Some(uuid) = &self.uuid {
            request = request.with_query(UUID_QUERY_PARAM, uuid).with_header(AUTH_HEADER, uuid);
        }
        Ok(request)
    }

    /// Sends `method` with `params` and returns the decoded body.
    ///
    /// Pass `json!({})` for a method that takes no parameters. The body is
    /// not checked for JSON-RPC shape; a server-side JSON-RPC error object in
    /// a 2xx response is returned as data.
    ///
    /// # Errors
    /// - [`ClientError::Connection`] if no response was obtained
    /// - [`ClientError::Response`] on a non-2xx status or a non-JSON body
    /// - [`ClientError::SessionClosed`] after [`JitoClient::close`]
    /// - [`ClientError::InvalidRequest`] for an empty method name
    pub async fn generic_call(&self, method: &str, params: Value) -> Result<RpcResult, ClientError> {
        self.call(method, params).await.map_err(|err| {
            tracing::warn!(method, error = %err, "JSON-RPC call failed");
            err
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<RpcResult, ClientError> {
        if method.trim().is_empty() {
            return Err(ClientError::InvalidRequest("method name must not be empty".to_string()));
        }
        let session = self.acquire()?;
        let request = self.build_request(&RpcRequest::new(method, params))?;

        tracing::debug!(method, url = %self.base_url, "→ JSON-RPC call");
        let response = session.send(request).await?;
        let status = response.status;
        let response = response.error_for_status()?;
        let data = response
            .json()
            .map_err(|e| ClientError::Response { status: Some(status), message: e.to_string() })?;
        tracing::debug!(method, status, "← JSON-RPC response");

        Ok(RpcResult::ok(data))
    }

    /// Fetches the tip accounts (`getTipAccounts`).
    pub async fn get_tip_accounts(&self) -> Result<RpcResult, ClientError> {
        self.generic_call("getTipAccounts", json!({})).await
    }

    /// Fetches the tip accounts and picks one uniformly at random.
    ///
    /// # Errors
    /// Besides the errors of [`JitoClient::get_tip_accounts`], returns
    /// [`ClientError::Response`] without a status when `result` is missing,
    /// is not an array of strings, or is empty.
    pub async fn get_random_tip_account(&self) -> Result<String, ClientError> {
        let accounts = self.get_tip_accounts().await?;
        choose_tip_account(&accounts.data)
    }

    /// Submits a bundle (`sendBundle`). `params` is forwarded unchanged,
    /// typically `[[<encoded tx>, ...]]`.
    pub async fn send_bundle(&self, params: Value) -> Result<RpcResult, ClientError> {
        self.generic_call("sendBundle", params).await
    }

    /// Queries landed bundle statuses (`getBundleStatuses`).
    pub async fn get_bundle_statuses<S: AsRef<str>>(
        &self,
        bundle_ids: &[S],
    ) -> Result<RpcResult, ClientError> {
        self.generic_call("getBundleStatuses", bundle_id_params(bundle_ids)).await
    }

    /// Queries in-flight bundle statuses (`getInflightBundleStatuses`).
    pub async fn get_inflight_bundle_statuses<S: AsRef<str>>(
        &self,
        bundle_ids: &[S],
    ) -> Result<RpcResult, ClientError> {
        self.generic_call("getInflightBundleStatuses", bundle_id_params(bundle_ids)).await
    }
}

impl Drop for JitoClient {
    fn drop(&mut self) { self.close(); }
}
