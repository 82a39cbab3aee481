//! Error taxonomy for client calls.

use transport::TransportError;

/// Failure of a single client call.
///
/// `Connection` and `Response` are the two remote failure kinds: the first
/// means no HTTP response was obtained, the second means one was obtained but
/// could not be turned into the data the caller asked for.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// DNS, TCP, TLS or timeout failure before any response arrived.
    #[error("connection error: {0}")]
    Connection(String),

    /// Non-2xx status, an undecodable body, or a body missing expected data.
    #[error("{}", describe_response(.status, .message))]
    Response {
        /// HTTP status code, when the failure came from the status line.
        status: Option<u16>,
        /// Server-provided message or a synthesized description.
        message: String,
    },

    /// The call was issued after the client was closed.
    #[error("client session is closed")]
    SessionClosed,

    /// The call was rejected locally before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn describe_response(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("response error (HTTP {status}): {message}"),
        None => format!("response error: {message}"),
    }
}

impl ClientError {
    /// Builds a [`ClientError::Response`] that did not come from a status code.
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        ClientError::Response { status: None, message: message.into() }
    }

    /// HTTP status attached to a [`ClientError::Response`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Response { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` for transport-level failures.
    pub fn is_connection(&self) -> bool { matches!(self, ClientError::Connection(_)) }

    /// Returns `true` for failures derived from a received response.
    pub fn is_response(&self) -> bool { matches!(self, ClientError::Response { .. }) }

    /// Whether repeating the same call may succeed.
    ///
    /// Connection failures, 429 and 5xx responses are retryable; other 4xx
    /// responses and local errors are not. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Connection(_) => true,
            ClientError::Response { status: Some(status), .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connect(msg) => ClientError::Connection(msg),
            TransportError::Timeout(msg) => ClientError::Connection(format!("timed out: {msg}")),
            TransportError::Status { status, message } => {
                ClientError::Response { status: Some(status), message }
            }
            TransportError::Serialization(msg) => ClientError::unexpected_response(msg),
            TransportError::Closed => ClientError::SessionClosed,
        }
    }
}
