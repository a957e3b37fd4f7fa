use crate::{RpcServerConfig, RpcServerError};
use callflow::rpc::{ActiveCall, CallError, RpcHandler, RpcHandlerError, WireStatus};
use tokio::sync::mpsc;

/// Something the server side of a call delivered to its peer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CallEvent {
    Response(Vec<u8>),
    Status(WireStatus),
}

/// The server side of an in-process call, handed to the dispatcher.
///
/// Requests arrive from, and events leave to, the matching
/// [`ChannelCallPeer`] over bounded channels. Once the peer is dropped the
/// call is cancelled: pending and subsequent reads and writes fail with
/// [`CallError`].
#[derive(Debug)]
pub struct ChannelCall {
    requests: mpsc::Receiver<Vec<u8>>,
    events: mpsc::Sender<CallEvent>,
    released: bool,
}

/// The client side of an in-process call.
///
/// Dropping the peer cancels the call.
#[derive(Debug)]
pub struct ChannelCallPeer {
    // Declared before `requests` so a dropped peer closes the event channel
    // first; the server can then tell a cancellation from a half-close.
    events: mpsc::Receiver<CallEvent>,
    requests: Option<mpsc::Sender<Vec<u8>>>,
}

impl ChannelCall {
    /// Creates a linked call and peer.
    pub fn pair(config: &RpcServerConfig) -> (ChannelCall, ChannelCallPeer) {
        let capacity = config.call_capacity();
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let (event_tx, event_rx) = mpsc::channel(capacity);

        (
            ChannelCall {
                requests: request_rx,
                events: event_tx,
                released: false,
            },
            ChannelCallPeer {
                events: event_rx,
                requests: Some(request_tx),
            },
        )
    }

    /// Whether the peer has gone away.
    pub fn is_cancelled(&self) -> bool {
        self.events.is_closed()
    }

    async fn emit(&mut self, event: CallEvent) -> Result<(), CallError> {
        self.events
            .send(event)
            .await
            .map_err(|_| CallError::call("peer cancelled the call"))
    }
}

#[async_trait::async_trait]
impl ActiveCall for ChannelCall {
    async fn read_request(&mut self) -> Result<Option<Vec<u8>>, CallError> {
        if self.released {
            return Err(CallError::event("call resources already released"));
        }

        let request = tokio::select! {
            biased;
            _ = self.events.closed() => {
                return Err(CallError::event("peer cancelled the call"));
            }
            request = self.requests.recv() => request,
        };

        match request {
            Some(request) => Ok(Some(request)),
            None if self.is_cancelled() => Err(CallError::event("peer cancelled the call")),
            None => Ok(None),
        }
    }

    async fn write_response(&mut self, message: Vec<u8>) -> Result<(), CallError> {
        self.emit(CallEvent::Response(message)).await
    }

    async fn send_status(&mut self, status: WireStatus) -> Result<(), CallError> {
        self.emit(CallEvent::Status(status)).await
    }

    async fn run_bidi(&mut self, handler: &RpcHandler) -> Result<(), RpcHandlerError> {
        handler.drive_bidi(self).await
    }

    fn release_resources(&mut self) {
        if !self.released {
            self.released = true;
            // Further sends from the peer fail; anything still buffered is dropped.
            self.requests.close();
        }
    }

    async fn finish(&mut self) {
        tracing::trace!(cancelled = self.is_cancelled(), "channel call finished");
    }
}

impl ChannelCallPeer {
    /// Sends one request message, waiting for buffer space.
    pub async fn send(&self, request: Vec<u8>) -> Result<(), RpcServerError> {
        match &self.requests {
            Some(requests) => requests
                .send(request)
                .await
                .map_err(|_| RpcServerError::CallClosed),
            None => Err(RpcServerError::CallClosed),
        }
    }

    /// Signals that no more requests will be sent.
    pub fn close_requests(&mut self) {
        self.requests = None;
    }

    /// Receives the next event. `None` once the server side has finished
    /// with the call and every event has been received.
    pub async fn recv(&mut self) -> Option<CallEvent> {
        self.events.recv().await
    }

    /// Abandons the call.
    pub fn cancel(self) {
        drop(self);
    }

    /// Half-closes the request side and collects everything the server
    /// sends until the call ends: the responses in order and the status,
    /// if one was sent.
    pub async fn finish(mut self) -> (Vec<Vec<u8>>, Option<WireStatus>) {
        self.close_requests();

        let mut responses = Vec::new();
        let mut status = None;
        while let Some(event) = self.recv().await {
            match event {
                CallEvent::Response(response) => responses.push(response),
                CallEvent::Status(terminal) => status = Some(terminal),
            }
        }

        (responses, status)
    }
}
