use super::{
    ActiveCall, CallShape, RpcCallContext, RpcHandler, RpcHandlerArgs, RpcHandlerError,
    RpcMethodDescriptor, RpcOutcome, RpcReply, StatusCode, translate,
};
use crate::constants::STATUS_MISSING_REQUEST_MESSAGE;
use crate::utils::{increment_u32_id, now};
use tracing::Instrument;

/// Message sent when a handler reaches dispatch without matching its method's
/// shape.
const MISCONFIGURED_HANDLER_MESSAGE: &str = "method handler is misconfigured";

/// Drives one server call to completion.
///
/// Reads the request(s) the method's shape calls for, invokes `handler`,
/// writes its response(s) and sends exactly one terminal status, unless the
/// transport has already closed the call, in which case nothing more is
/// written. The call is always finalized: resources are released and
/// `finish` is called exactly once, as the last action.
///
/// Never returns an error; every failure ends as a status or is absorbed.
pub async fn dispatch<C>(descriptor: &RpcMethodDescriptor, handler: &RpcHandler, mut call: C)
where
    C: ActiveCall,
{
    let call_id = increment_u32_id();
    let shape = descriptor.call_shape();
    let span = tracing::debug_span!(
        "rpc_dispatch",
        method = descriptor.name(),
        %shape,
        call_id
    );

    async move {
        let started_at = now();

        // The endpoint validates arity once, at registration. This guard only
        // matters for callers that hand `dispatch` an unregistered pair.
        let outcome = match descriptor.assert_arity_matches(handler) {
            Ok(()) => match shape {
                CallShape::RequestResponse | CallShape::ClientStreaming => {
                    run_single_response(handler, shape, &mut call).await
                }
                CallShape::ServerStreaming => run_server_streaming(handler, &mut call).await,
                CallShape::BidiStreaming => call.run_bidi(handler).await,
            },
            Err(err) => {
                tracing::error!(error = %err, "refusing to invoke handler");
                Err(RpcHandlerError::declined(
                    StatusCode::Unimplemented,
                    MISCONFIGURED_HANDLER_MESSAGE,
                ))
            }
        };

        if let Some(status) = translate(&outcome) {
            tracing::debug!(code = ?status.code, ok = status.is_ok(), "sending status");
            if let Err(err) = call.send_status(status).await {
                tracing::debug!(error = %err, "call closed before status could be sent");
            }
        }

        call.release_resources();
        call.finish().await;

        tracing::trace!(
            elapsed_us = now().saturating_sub(started_at),
            "call finished"
        );
    }
    .instrument(span)
    .await
}

/// Reads the request up front when the shape has a single one, then invokes
/// the handler. Streaming-request handlers read through their context.
async fn invoke<C: ActiveCall>(
    handler: &RpcHandler,
    shape: CallShape,
    call: &mut C,
) -> Result<RpcReply, RpcHandlerError> {
    let request = if shape.reads_request_first() {
        Some(read_single_request(call).await?)
    } else {
        None
    };

    handler
        .invoke(RpcHandlerArgs {
            request,
            context: RpcCallContext::new(&mut *call),
        })
        .await
}

async fn run_single_response<C: ActiveCall>(
    handler: &RpcHandler,
    shape: CallShape,
    call: &mut C,
) -> RpcOutcome {
    let reply = invoke(handler, shape, call).await?;
    let response = expect_message(reply, shape)?;
    call.write_response(response).await?;
    Ok(())
}

async fn run_server_streaming<C: ActiveCall>(handler: &RpcHandler, call: &mut C) -> RpcOutcome {
    let reply = invoke(handler, CallShape::ServerStreaming, call).await?;

    let responses = match reply {
        RpcReply::Messages(responses) => responses,
        RpcReply::Done => Vec::new(),
        other => return Err(unexpected_reply(&other, CallShape::ServerStreaming)),
    };

    for response in responses {
        call.write_response(response).await?;
    }
    Ok(())
}

async fn read_single_request<C: ActiveCall>(call: &mut C) -> Result<Vec<u8>, RpcHandlerError> {
    match call.read_request().await? {
        Some(request) => Ok(request),
        None => Err(RpcHandlerError::declined(
            StatusCode::Internal,
            STATUS_MISSING_REQUEST_MESSAGE,
        )),
    }
}

fn expect_message(reply: RpcReply, shape: CallShape) -> Result<Vec<u8>, RpcHandlerError> {
    match reply {
        RpcReply::Message(message) => Ok(message),
        other => Err(unexpected_reply(&other, shape)),
    }
}

fn unexpected_reply(reply: &RpcReply, shape: CallShape) -> RpcHandlerError {
    RpcHandlerError::failed(format!("{} handler returned {}", shape, reply.kind()))
}
