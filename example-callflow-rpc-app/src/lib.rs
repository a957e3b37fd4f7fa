use callflow::rpc::{RpcHandlerError, StatusCode};
use callflow_rpc_service::{
    RpcMethod, bidi_streaming_handler, client_streaming_handler, request_response_handler,
    server_streaming_handler,
};
use callflow_rpc_service_endpoint::{RpcServiceEndpointInterface, error::RpcServiceEndpointError};
use callflow_tokio_rpc_server::RpcServerConfig;
use example_callflow_rpc_service_definition::{Chat, Echo, Repeat, RepeatRequest, Sum};

/// Environment variable overriding the per-call channel capacity.
pub const CALL_BUFFER_ENV: &str = "CALLFLOW_CALL_BUFFER";

/// Upper bound on `RepeatRequest::times`.
pub const MAX_REPEAT: u32 = 1_000;

/// Builds the server configuration, applying an override from
/// [`CALL_BUFFER_ENV`] when it holds a positive integer.
pub fn config_from_env() -> RpcServerConfig {
    config_with_call_buffer(std::env::var(CALL_BUFFER_ENV).ok().as_deref())
}

pub fn config_with_call_buffer(call_buffer: Option<&str>) -> RpcServerConfig {
    let config = RpcServerConfig::default();

    match call_buffer.map(str::trim) {
        None => config,
        Some(raw) => match raw.parse::<usize>() {
            Ok(size) if size > 0 => config.with_call_buffer_size(size),
            _ => {
                tracing::warn!(
                    "Ignoring {}={:?}; expected a positive integer",
                    CALL_BUFFER_ENV,
                    raw
                );
                config
            }
        },
    }
}

/// Registers a handler for every example method on `endpoint`.
pub async fn register_example_handlers<E>(endpoint: &E) -> Result<(), RpcServiceEndpointError>
where
    E: RpcServiceEndpointInterface,
{
    endpoint
        .register_method::<Echo>(request_response_handler::<Echo, _, _, _>(
            |bytes: Vec<u8>, _ctx| Box::pin(async move { Ok(bytes) }),
        ))
        .await?;

    endpoint
        .register_method::<Sum>(client_streaming_handler::<Sum, _, _, _>(|mut ctx| {
            Box::pin(async move {
                let mut total = 0.0;
                while let Some(value) = ctx.read_with(Sum::decode_request).await? {
                    total += value;
                }
                Ok(total)
            })
        }))
        .await?;

    endpoint
        .register_method::<Repeat>(server_streaming_handler::<Repeat, _, _, _>(
            |req: RepeatRequest, _ctx| {
                Box::pin(async move {
                    if req.times > MAX_REPEAT {
                        return Err(RpcHandlerError::declined(
                            StatusCode::InvalidArgument,
                            format!("times must not exceed {}", MAX_REPEAT),
                        ));
                    }
                    Ok((1..=req.times)
                        .map(|i| format!("{} {}", i, req.text))
                        .collect())
                })
            },
        ))
        .await?;

    endpoint
        .register_method::<Chat>(bidi_streaming_handler::<Chat, String, String, _>(
            |mut ctx| {
                Box::pin(async move {
                    let mut lines = 0usize;
                    while let Some(line) = ctx.read_with(Chat::decode_request).await? {
                        lines += 1;
                        ctx.write_with(format!("#{} {}", lines, line), Chat::encode_response)
                            .await?;
                    }
                    Ok(())
                })
            },
        ))
        .await?;

    Ok(())
}
