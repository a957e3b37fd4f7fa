/// Message sent alongside `StatusCode::Ok` when a handler completes normally.
pub const STATUS_OK_MESSAGE: &str = "OK";

/// Message sent alongside `StatusCode::Unknown` when a handler fails with
/// anything other than an explicit decline. The failure detail is only logged
/// on the server and never echoed to the peer.
pub const STATUS_NO_REASON_MESSAGE: &str = "no reason given";

/// Message sent when a single-request call ends its request stream without
/// delivering the request.
pub const STATUS_MISSING_REQUEST_MESSAGE: &str = "Missing request message.";

/// Declared parameter count of handlers receiving `(request, context)`.
pub const UNARY_REQUEST_HANDLER_ARITY: usize = 2;

/// Declared parameter count of handlers receiving only `(context)`.
pub const STREAMING_REQUEST_HANDLER_ARITY: usize = 1;
