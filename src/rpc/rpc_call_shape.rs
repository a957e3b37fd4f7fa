use super::{MessageShape, ShapeMarker};
use crate::constants::{STREAMING_REQUEST_HANDLER_ARITY, UNARY_REQUEST_HANDLER_ARITY};
use std::fmt;

/// The four ways a call can combine request and response cardinality.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CallShape {
    RequestResponse,
    ClientStreaming,
    ServerStreaming,
    BidiStreaming,
}

impl CallShape {
    /// Classifies a `(request, response)` shape pair.
    pub const fn classify(request: MessageShape, response: MessageShape) -> Self {
        match (request.is_stream(), response.is_stream()) {
            (false, false) => CallShape::RequestResponse,
            (true, false) => CallShape::ClientStreaming,
            (false, true) => CallShape::ServerStreaming,
            (true, true) => CallShape::BidiStreaming,
        }
    }

    /// Classifies a pair of marker types, e.g. `CallShape::of::<Stream<A>, Single<B>>()`.
    pub const fn of<Req: ShapeMarker, Resp: ShapeMarker>() -> Self {
        Self::classify(Req::SHAPE, Resp::SHAPE)
    }

    #[inline]
    pub fn is_request_response(self) -> bool {
        self == CallShape::RequestResponse
    }

    #[inline]
    pub fn is_client_streamer(self) -> bool {
        self == CallShape::ClientStreaming
    }

    #[inline]
    pub fn is_server_streamer(self) -> bool {
        self == CallShape::ServerStreaming
    }

    #[inline]
    pub fn is_bidi_streamer(self) -> bool {
        self == CallShape::BidiStreaming
    }

    /// Whether the dispatcher reads the single request before invoking the
    /// handler. Streaming-request shapes let the handler read instead.
    #[inline]
    pub fn reads_request_first(self) -> bool {
        matches!(self, CallShape::RequestResponse | CallShape::ServerStreaming)
    }

    /// Number of parameters a handler for this shape must declare:
    /// `(request, context)` or just `(context)`.
    pub const fn handler_arity(self) -> usize {
        match self {
            CallShape::RequestResponse | CallShape::ServerStreaming => UNARY_REQUEST_HANDLER_ARITY,
            CallShape::ClientStreaming | CallShape::BidiStreaming => {
                STREAMING_REQUEST_HANDLER_ARITY
            }
        }
    }
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallShape::RequestResponse => "request_response",
            CallShape::ClientStreaming => "client_streaming",
            CallShape::ServerStreaming => "server_streaming",
            CallShape::BidiStreaming => "bidi_streaming",
        };
        f.write_str(name)
    }
}
