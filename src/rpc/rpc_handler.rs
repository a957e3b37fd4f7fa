use super::{ActiveCall, RpcCallContext, RpcHandlerError, StatusCode};
use crate::constants::{
    STATUS_MISSING_REQUEST_MESSAGE, STREAMING_REQUEST_HANDLER_ARITY, UNARY_REQUEST_HANDLER_ARITY,
};
use std::{fmt, future::Future, pin::Pin, sync::Arc};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type RpcHandlerResult = Result<RpcReply, RpcHandlerError>;

/// What a handler produced when it returned normally.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RpcReply {
    /// Exactly one response message.
    Message(Vec<u8>),
    /// A finite, ordered sequence of response messages (possibly empty).
    Messages(Vec<Vec<u8>>),
    /// The handler wrote everything it had to write itself.
    Done,
}

impl RpcReply {
    pub fn kind(&self) -> &'static str {
        match self {
            RpcReply::Message(_) => "single message",
            RpcReply::Messages(_) => "message sequence",
            RpcReply::Done => "no message",
        }
    }
}

/// Arguments passed to a handler invocation.
///
/// `request` is only populated for shapes whose request side is a single
/// message; streaming-request handlers read through `context` instead.
pub struct RpcHandlerArgs<'a> {
    pub request: Option<Vec<u8>>,
    pub context: RpcCallContext<'a>,
}

type RpcHandlerFn =
    dyn for<'a> Fn(RpcHandlerArgs<'a>) -> BoxFuture<'a, RpcHandlerResult> + Send + Sync;

/// An application-supplied method implementation together with the number of
/// parameters it declares.
///
/// The typed constructors fix the declared arity from their signature:
/// `(request, context)` handlers declare 2, `(context)` handlers declare 1.
/// [`RpcHandler::dynamic`] takes the arity explicitly, for handlers assembled
/// at runtime.
#[derive(Clone)]
pub struct RpcHandler {
    arity: usize,
    func: Arc<RpcHandlerFn>,
}

impl RpcHandler {
    /// A handler taking `(request, context)` and returning one response.
    pub fn request_response<F>(handler: F) -> Self
    where
        F: for<'a> Fn(Vec<u8>, RpcCallContext<'a>) -> BoxFuture<'a, Result<Vec<u8>, RpcHandlerError>>
            + Send
            + Sync
            + 'static,
    {
        Self::dynamic(UNARY_REQUEST_HANDLER_ARITY, move |args| {
            let RpcHandlerArgs { request, context } = args;
            let invocation = request.map(|request| handler(request, context));
            Box::pin(async move {
                match invocation {
                    Some(invocation) => invocation.await.map(RpcReply::Message),
                    None => Err(missing_request()),
                }
            })
        })
    }

    /// A handler taking `(context)`, reading any number of requests through
    /// it, and returning one response.
    pub fn client_streaming<F>(handler: F) -> Self
    where
        F: for<'a> Fn(RpcCallContext<'a>) -> BoxFuture<'a, Result<Vec<u8>, RpcHandlerError>>
            + Send
            + Sync
            + 'static,
    {
        Self::dynamic(STREAMING_REQUEST_HANDLER_ARITY, move |args| {
            let invocation = handler(args.context);
            Box::pin(async move { invocation.await.map(RpcReply::Message) })
        })
    }

    /// A handler taking `(request, context)` and returning the ordered
    /// sequence of responses to stream back.
    pub fn server_streaming<F>(handler: F) -> Self
    where
        F: for<'a> Fn(
                Vec<u8>,
                RpcCallContext<'a>,
            ) -> BoxFuture<'a, Result<Vec<Vec<u8>>, RpcHandlerError>>
            + Send
            + Sync
            + 'static,
    {
        Self::dynamic(UNARY_REQUEST_HANDLER_ARITY, move |args| {
            let RpcHandlerArgs { request, context } = args;
            let invocation = request.map(|request| handler(request, context));
            Box::pin(async move {
                match invocation {
                    Some(invocation) => invocation.await.map(RpcReply::Messages),
                    None => Err(missing_request()),
                }
            })
        })
    }

    /// A handler taking `(context)` that reads and writes through it freely.
    pub fn bidi_streaming<F>(handler: F) -> Self
    where
        F: for<'a> Fn(RpcCallContext<'a>) -> BoxFuture<'a, Result<(), RpcHandlerError>>
            + Send
            + Sync
            + 'static,
    {
        Self::dynamic(STREAMING_REQUEST_HANDLER_ARITY, move |args| {
            let invocation = handler(args.context);
            Box::pin(async move { invocation.await.map(|()| RpcReply::Done) })
        })
    }

    /// A handler whose declared parameter count is only known at runtime.
    ///
    /// The arity is checked against the method's shape when the handler is
    /// registered, not here.
    pub fn dynamic<F>(arity: usize, handler: F) -> Self
    where
        F: for<'a> Fn(RpcHandlerArgs<'a>) -> BoxFuture<'a, RpcHandlerResult>
            + Send
            + Sync
            + 'static,
    {
        Self {
            arity,
            func: Arc::new(handler),
        }
    }

    /// The number of parameters this handler declares.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn invoke<'a>(&self, args: RpcHandlerArgs<'a>) -> BoxFuture<'a, RpcHandlerResult> {
        (self.func)(args)
    }

    /// Runs this handler as a bidirectional stream directly on `call`.
    ///
    /// Whatever the handler returns instead of writing through its context is
    /// written afterwards, in order.
    pub async fn drive_bidi(&self, call: &mut dyn ActiveCall) -> Result<(), RpcHandlerError> {
        let reply = self
            .invoke(RpcHandlerArgs {
                request: None,
                context: RpcCallContext::new(&mut *call),
            })
            .await?;

        match reply {
            RpcReply::Done => {}
            RpcReply::Message(message) => call.write_response(message).await?,
            RpcReply::Messages(messages) => {
                for message in messages {
                    call.write_response(message).await?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Debug for RpcHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcHandler")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

fn missing_request() -> RpcHandlerError {
    RpcHandlerError::declined(StatusCode::Internal, STATUS_MISSING_REQUEST_MESSAGE)
}
