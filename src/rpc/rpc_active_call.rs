use super::{CallError, RpcHandler, RpcHandlerError, WireStatus};

/// A live server call, as provided by the transport.
///
/// The dispatcher drives one call through this interface and never owns more
/// than the handle itself; the transport may tear the call down at any time,
/// in which case reads and writes fail with [`CallError`].
#[async_trait::async_trait]
pub trait ActiveCall: Send {
    /// Reads the next request message. `Ok(None)` means the peer finished
    /// sending requests.
    async fn read_request(&mut self) -> Result<Option<Vec<u8>>, CallError>;

    async fn write_response(&mut self, message: Vec<u8>) -> Result<(), CallError>;

    /// Sends the terminal status. Called at most once per call, and never after
    /// the transport has reported the call closed.
    async fn send_status(&mut self, status: WireStatus) -> Result<(), CallError>;

    /// Runs a bidirectional-streaming handler against this call, interleaving
    /// reads and writes however the transport sees fit.
    ///
    /// Implementations without special needs can delegate to
    /// [`RpcHandler::drive_bidi`].
    async fn run_bidi(&mut self, handler: &RpcHandler) -> Result<(), RpcHandlerError>;

    /// Releases per-call resources. Invoked once per dispatch, whatever the outcome.
    fn release_resources(&mut self);

    /// Marks the call complete with the transport. Always the last action a
    /// dispatch performs on the call.
    async fn finish(&mut self);
}
