use super::{CallError, StatusCode, WireStatus};
use std::fmt;
use std::io;

/// Ways a handler invocation can end other than returning normally.
#[derive(Debug)]
pub enum RpcHandlerError {
    /// The handler deliberately declined the call with a status of its choosing.
    /// Both code and message are sent to the peer verbatim.
    Declined(WireStatus),
    /// Anything else that went wrong. The detail stays on the server.
    Failed(Box<dyn std::error::Error + Send + Sync>),
    /// The transport already closed the call underneath the handler.
    Transport(CallError),
}

impl RpcHandlerError {
    /// Declines the call with an explicit `(code, message)`.
    pub fn declined(code: StatusCode, message: impl Into<String>) -> Self {
        RpcHandlerError::Declined(WireStatus::new(code, message))
    }

    pub fn failed<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        RpcHandlerError::Failed(err.into())
    }

    #[inline]
    pub fn is_transport_closed(&self) -> bool {
        matches!(self, RpcHandlerError::Transport(_))
    }
}

impl fmt::Display for RpcHandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcHandlerError::Declined(status) => write!(f, "handler declined call: {}", status),
            RpcHandlerError::Failed(err) => write!(f, "handler failed: {}", err),
            RpcHandlerError::Transport(err) => write!(f, "transport closed call: {}", err),
        }
    }
}

impl std::error::Error for RpcHandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RpcHandlerError::Failed(err) => Some(err.as_ref()),
            RpcHandlerError::Transport(err) => Some(err),
            RpcHandlerError::Declined(_) => None,
        }
    }
}

impl From<CallError> for RpcHandlerError {
    fn from(err: CallError) -> Self {
        RpcHandlerError::Transport(err)
    }
}

// Codec failures surface as `io::Error`.
impl From<io::Error> for RpcHandlerError {
    fn from(err: io::Error) -> Self {
        RpcHandlerError::Failed(Box::new(err))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for RpcHandlerError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        RpcHandlerError::Failed(err)
    }
}
