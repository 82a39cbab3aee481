//! Session lifecycle.

use std::ops::Deref;

use transport::DynTransport;

use crate::JitoClient;

/// Where a client is in its open/close lifecycle.
pub(crate) enum SessionState {
    /// Constructed; no session acquired yet.
    Idle,
    /// A live session is owned by the client.
    Open(DynTransport),
    /// Explicitly closed. Calls fail until `open` is called again.
    Closed,
}

impl SessionState {
    /// Takes the live session out, leaving `Closed` behind.
    pub(crate) fn release(&mut self) -> Option<DynTransport> {
        match std::mem::replace(self, SessionState::Closed) {
            SessionState::Open(session) => Some(session),
            SessionState::Idle | SessionState::Closed => None,
        }
    }
}

/// Scope guard returned by [`JitoClient::session`].
///
/// Derefs to the client and closes its session when dropped, whether the
/// scope ends normally, through `?`, or by unwinding.
///
/// ```no_run
/// use jito_client::{ClientError, JitoClient};
///
/// # async fn demo() -> Result<(), ClientError> {
/// let client = JitoClient::new("https://mainnet.block-engine.jito.wtf/api/v1/bundles", None);
/// {
///     let client = client.session()?;
///     let account = client.get_random_tip_account().await?;
///     println!("tip {account}");
/// }
/// assert!(!client.is_open());
/// # Ok(())
/// # }
/// ```
#[must_use = "the session is closed as soon as the guard is dropped"]
pub struct SessionGuard<'a> {
    client: &'a JitoClient,
}

impl<'a> SessionGuard<'a> {
    pub(crate) fn new(client: &'a JitoClient) -> Self { Self { client } }

    /// Ends the scope early. Equivalent to dropping the guard.
    pub fn close(self) {}
}

impl Deref for SessionGuard<'_> {
    type Target = JitoClient;

    fn deref(&self) -> &JitoClient { self.client }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) { self.client.close(); }
}
