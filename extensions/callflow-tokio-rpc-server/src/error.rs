use std::fmt;

/// Errors surfaced to the side that opens calls.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RpcServerError {
    /// The accept loop has exited; the call was never delivered.
    ServerStopped { method: String },
    /// The server task stopped serving the call before it accepted the request.
    CallClosed,
}

impl fmt::Display for RpcServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcServerError::ServerStopped { method } => {
                write!(f, "server stopped before accepting a call to `{}`", method)
            }
            RpcServerError::CallClosed => write!(f, "call is no longer accepting requests"),
        }
    }
}

impl std::error::Error for RpcServerError {}
