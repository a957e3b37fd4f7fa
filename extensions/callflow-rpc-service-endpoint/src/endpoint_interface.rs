use super::{HandlerTableLock, RpcRegisteredMethod, error::RpcServiceEndpointError};
use callflow::rpc::{
    ActiveCall, RpcHandler, RpcMethodDescriptor, StatusCode, WireStatus, dispatch,
};
use callflow_rpc_service::{RpcMethod, method_id_hash};
use std::{collections::hash_map::Entry, sync::Arc};

#[async_trait::async_trait]
pub trait RpcServiceEndpointInterface: Send + Sync {
    type HandlersLock: HandlerTableLock;

    fn get_handlers(&self) -> Arc<Self::HandlersLock>;

    /// Registers `handler` to serve the method described by `descriptor`.
    ///
    /// The handler's declared arity is checked against the method's call shape
    /// here, so a misconfigured handler is rejected before it can serve a call.
    async fn register(
        &self,
        descriptor: RpcMethodDescriptor,
        handler: RpcHandler,
    ) -> Result<(), RpcServiceEndpointError> {
        descriptor
            .assert_arity_matches(&handler)
            .map_err(|source| RpcServiceEndpointError::Arity {
                method: descriptor.name().to_string(),
                source,
            })?;

        let method_id = method_id_hash(descriptor.name());

        self.get_handlers()
            .write_handlers(move |handlers| match handlers.entry(method_id) {
                Entry::Occupied(existing) if existing.get().serves(descriptor.name()) => {
                    Err(RpcServiceEndpointError::Duplicate {
                        method: descriptor.name().to_string(),
                    })
                }
                Entry::Occupied(existing) => Err(RpcServiceEndpointError::IdCollision {
                    method: descriptor.name().to_string(),
                    existing: existing.get().descriptor.name().to_string(),
                }),
                Entry::Vacant(entry) => {
                    tracing::info!(
                        method = descriptor.name(),
                        shape = %descriptor.call_shape(),
                        "registered method"
                    );
                    entry.insert(RpcRegisteredMethod {
                        descriptor: Arc::new(descriptor),
                        handler,
                    });
                    Ok(())
                }
            })
            .await
    }

    /// Registers `handler` for the typed method `M`.
    async fn register_method<M>(&self, handler: RpcHandler) -> Result<(), RpcServiceEndpointError>
    where
        M: RpcMethod + 'static,
    {
        self.register(M::descriptor(), handler).await
    }

    /// Looks up the method registered under `method_name`.
    async fn lookup(&self, method_name: &str) -> Option<RpcRegisteredMethod> {
        let method_id = method_id_hash(method_name);
        self.get_handlers()
            .read_handlers(move |handlers| match handlers.get(&method_id) {
                Some(method) if method.serves(method_name) => Some(method.clone()),
                Some(method) => {
                    tracing::warn!(
                        method = method_name,
                        registered = method.descriptor.name(),
                        "method ID collision; treating as unregistered"
                    );
                    None
                }
                None => None,
            })
            .await
    }

    /// Serves one incoming call for `method_name` to completion.
    ///
    /// Calls for unknown methods are answered with `Unimplemented` and
    /// finalized without touching any handler. Never fails.
    async fn dispatch_call<A>(&self, method_name: &str, mut call: A)
    where
        A: ActiveCall + 'static,
    {
        match self.lookup(method_name).await {
            Some(method) => dispatch(&method.descriptor, &method.handler, call).await,
            None => {
                tracing::warn!(method = method_name, "call for unregistered method");
                let status = WireStatus::new(
                    StatusCode::Unimplemented,
                    format!("method not found: {}", method_name),
                );
                if let Err(err) = call.send_status(status).await {
                    tracing::debug!(error = %err, "call closed before status could be sent");
                }
                call.release_resources();
                call.finish().await;
            }
        }
    }
}
