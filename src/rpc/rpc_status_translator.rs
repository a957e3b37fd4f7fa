use super::{RpcHandlerError, StatusCode, WireStatus};
use crate::constants::STATUS_NO_REASON_MESSAGE;

/// How a call ended from the handler's point of view.
pub type RpcOutcome = Result<(), RpcHandlerError>;

/// Maps a call outcome to the status to send, if any.
///
/// Returns `None` when the transport already closed the call: nothing may be
/// written to it anymore, so the condition is only logged.
pub fn translate(outcome: &RpcOutcome) -> Option<WireStatus> {
    match outcome {
        Ok(()) => Some(WireStatus::ok()),
        Err(RpcHandlerError::Declined(status)) => Some(status.clone()),
        Err(RpcHandlerError::Failed(err)) => {
            tracing::warn!(error = %err, "handler failed; reporting unknown status");
            Some(WireStatus::new(StatusCode::Unknown, STATUS_NO_REASON_MESSAGE))
        }
        Err(RpcHandlerError::Transport(err)) => {
            tracing::debug!(error = %err, "call closed by transport; no status sent");
            None
        }
    }
}
