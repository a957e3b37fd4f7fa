use super::{CallShape, MessageShape, RpcArityError, RpcHandler, ShapeMarker, validate_arity};
use std::borrow::Cow;

/// Identifies one RPC method and the cardinality of both its sides.
///
/// The call shape is classified once, at construction, and never changes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RpcMethodDescriptor {
    name: Cow<'static, str>,
    request_shape: MessageShape,
    response_shape: MessageShape,
    call_shape: CallShape,
}

impl RpcMethodDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        request_shape: MessageShape,
        response_shape: MessageShape,
    ) -> Self {
        Self {
            name: name.into(),
            request_shape,
            response_shape,
            call_shape: CallShape::classify(request_shape, response_shape),
        }
    }

    /// Builds a descriptor from marker types, e.g.
    /// `RpcMethodDescriptor::from_markers::<Stream<Point>, Single<Summary>>("record_route")`.
    pub fn from_markers<Req: ShapeMarker, Resp: ShapeMarker>(
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(name, Req::SHAPE, Resp::SHAPE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request_shape(&self) -> MessageShape {
        self.request_shape
    }

    pub fn response_shape(&self) -> MessageShape {
        self.response_shape
    }

    pub fn call_shape(&self) -> CallShape {
        self.call_shape
    }

    pub fn is_request_response(&self) -> bool {
        self.call_shape.is_request_response()
    }

    pub fn is_client_streamer(&self) -> bool {
        self.call_shape.is_client_streamer()
    }

    pub fn is_server_streamer(&self) -> bool {
        self.call_shape.is_server_streamer()
    }

    pub fn is_bidi_streamer(&self) -> bool {
        self.call_shape.is_bidi_streamer()
    }

    /// Fails if `handler` declares a parameter count this method's shape
    /// cannot serve.
    pub fn assert_arity_matches(&self, handler: &RpcHandler) -> Result<(), RpcArityError> {
        validate_arity(self.call_shape, handler.arity())
    }
}
