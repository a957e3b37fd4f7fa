use std::fmt;

/// Signals that the transport already terminated the call.
///
/// The peer may have disconnected, the deadline may have passed, or the call
/// may have been cancelled. Either way nothing more can be written to it, and
/// the dispatcher absorbs the condition instead of sending a status.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CallError {
    /// Delivery of a read/write completion failed.
    Event { reason: String },
    /// The call object itself rejected the operation.
    Call { reason: String },
}

impl CallError {
    pub fn event(reason: impl Into<String>) -> Self {
        CallError::Event {
            reason: reason.into(),
        }
    }

    pub fn call(reason: impl Into<String>) -> Self {
        CallError::Call {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Event { reason } => write!(f, "call event failed: {}", reason),
            CallError::Call { reason } => write!(f, "call rejected operation: {}", reason),
        }
    }
}

impl std::error::Error for CallError {}
