//! Builders that turn typed handler functions into [`RpcHandler`]s.
//!
//! Each builder only accepts a method whose `Request`/`Response` markers match
//! its shape, so a handler with the wrong parameter list for its method does
//! not compile. Messages are decoded and encoded with the method's own codec;
//! codec failures end the call like any other handler failure.

use crate::RpcMethod;
use callflow::rpc::{BoxFuture, RpcCallContext, RpcHandler, RpcHandlerError, Single, Stream};

/// Wraps a `(request, context) -> response` handler for method `M`.
pub fn request_response_handler<M, Req, Resp, F>(handler: F) -> RpcHandler
where
    M: RpcMethod<Request = Single<Req>, Response = Single<Resp>> + 'static,
    Req: Send + 'static,
    Resp: Send + 'static,
    F: for<'a> Fn(Req, RpcCallContext<'a>) -> BoxFuture<'a, Result<Resp, RpcHandlerError>>
        + Send
        + Sync
        + 'static,
{
    RpcHandler::request_response(move |bytes, context| {
        let invocation = M::decode_request(&bytes).map(|request| handler(request, context));
        Box::pin(async move {
            let response = invocation?.await?;
            Ok(M::encode_response(response)?)
        })
    })
}

/// Wraps a `(context) -> response` handler for method `M`.
///
/// The handler reads its requests with
/// `context.read_with(M::decode_request)`.
pub fn client_streaming_handler<M, Req, Resp, F>(handler: F) -> RpcHandler
where
    M: RpcMethod<Request = Stream<Req>, Response = Single<Resp>> + 'static,
    Req: Send + 'static,
    Resp: Send + 'static,
    F: for<'a> Fn(RpcCallContext<'a>) -> BoxFuture<'a, Result<Resp, RpcHandlerError>>
        + Send
        + Sync
        + 'static,
{
    RpcHandler::client_streaming(move |context| {
        let invocation = handler(context);
        Box::pin(async move {
            let response = invocation.await?;
            Ok(M::encode_response(response)?)
        })
    })
}

/// Wraps a `(request, context) -> [response]` handler for method `M`.
pub fn server_streaming_handler<M, Req, Resp, F>(handler: F) -> RpcHandler
where
    M: RpcMethod<Request = Single<Req>, Response = Stream<Resp>> + 'static,
    Req: Send + 'static,
    Resp: Send + 'static,
    F: for<'a> Fn(Req, RpcCallContext<'a>) -> BoxFuture<'a, Result<Vec<Resp>, RpcHandlerError>>
        + Send
        + Sync
        + 'static,
{
    RpcHandler::server_streaming(move |bytes, context| {
        let invocation = M::decode_request(&bytes).map(|request| handler(request, context));
        Box::pin(async move {
            let responses = invocation?.await?;
            let encoded = responses
                .into_iter()
                .map(M::encode_response)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(encoded)
        })
    })
}

/// Wraps a `(context)` handler for bidirectional method `M`.
///
/// The handler reads with `context.read_with(M::decode_request)` and writes
/// with `context.write_with(response, M::encode_response)`.
pub fn bidi_streaming_handler<M, Req, Resp, F>(handler: F) -> RpcHandler
where
    M: RpcMethod<Request = Stream<Req>, Response = Stream<Resp>> + 'static,
    F: for<'a> Fn(RpcCallContext<'a>) -> BoxFuture<'a, Result<(), RpcHandlerError>>
        + Send
        + Sync
        + 'static,
{
    RpcHandler::bidi_streaming(handler)
}
