//! Note: This `RpcServer` is a reference implementation that accepts calls over
//! in-process channels only. Any struct that utilizes an [`RpcServiceEndpoint`]
//! can function as a "server" for handling RPC calls; a network transport
//! would implement [`callflow::rpc::ActiveCall`] for its own call type and
//! hand those to [`RpcServiceEndpointInterface::dispatch_call`] the same way.

use crate::{ChannelCall, ChannelCallPeer, RpcServerConfig, RpcServerError};
use callflow_rpc_service_endpoint::{RpcServiceEndpoint, RpcServiceEndpointInterface};
use std::sync::Arc;
use tokio::{
    sync::{Notify, mpsc},
    task::JoinSet,
};

/// A call waiting for the accept loop.
#[derive(Debug)]
struct IncomingCall {
    method: String,
    call: ChannelCall,
}

/// A cloneable handle for opening calls against a running [`RpcServer`] and
/// for stopping it.
///
/// The accept loop keeps running while at least one handle is alive.
#[derive(Debug, Clone)]
pub struct RpcServerHandle {
    config: RpcServerConfig,
    acceptor: mpsc::Sender<IncomingCall>,
    shutdown: Arc<Notify>,
}

impl RpcServerHandle {
    /// Opens a call to `method` and returns the client side of it.
    ///
    /// Waits while the accept backlog is full.
    pub async fn call(&self, method: &str) -> Result<ChannelCallPeer, RpcServerError> {
        let (call, peer) = ChannelCall::pair(&self.config);

        self.acceptor
            .send(IncomingCall {
                method: method.to_string(),
                call,
            })
            .await
            .map_err(|_| RpcServerError::ServerStopped {
                method: method.to_string(),
            })?;

        Ok(peer)
    }

    /// Stops the accept loop. Calls already accepted run to completion.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

/// An RPC server that accepts channel calls and dispatches each one on its
/// own task.
pub struct RpcServer {
    endpoint: Arc<RpcServiceEndpoint>,
    handle: RpcServerHandle,
    incoming: mpsc::Receiver<IncomingCall>,
}

impl Default for RpcServer {
    fn default() -> Self {
        Self::new(RpcServerConfig::default())
    }
}

impl RpcServer {
    pub fn new(config: RpcServerConfig) -> Self {
        let (acceptor, incoming) = mpsc::channel(config.backlog_capacity());

        RpcServer {
            endpoint: Arc::new(RpcServiceEndpoint::new()),
            handle: RpcServerHandle {
                config,
                acceptor,
                shutdown: Arc::new(Notify::new()),
            },
            incoming,
        }
    }

    /// Returns an `Arc` clone of the underlying RPC service endpoint.
    /// This allows for registering handlers without tying the registration
    /// logic to the server implementation.
    pub fn endpoint(&self) -> Arc<RpcServiceEndpoint> {
        self.endpoint.clone()
    }

    /// Returns a handle for opening calls and shutting the server down.
    pub fn handle(&self) -> RpcServerHandle {
        self.handle.clone()
    }

    /// Opens a call to `method` through the server's own handle.
    ///
    /// Calls opened before [`RpcServer::serve`] starts wait in the backlog.
    pub async fn call(&self, method: &str) -> Result<ChannelCallPeer, RpcServerError> {
        self.handle.call(method).await
    }

    /// Runs the accept loop.
    ///
    /// Every accepted call is dispatched on its own task. The loop ends when
    /// every [`RpcServerHandle`] has been dropped or one of them called
    /// [`RpcServerHandle::shutdown`]; it then waits for in-flight calls.
    /// Returns the number of calls accepted.
    pub async fn serve(self) -> usize {
        let RpcServer {
            endpoint,
            handle,
            mut incoming,
        } = self;
        let shutdown = handle.shutdown.clone();
        // Only outside handles keep the loop alive.
        drop(handle);

        let mut in_flight = JoinSet::new();
        let mut accepted = 0usize;

        tracing::info!("Server accepting calls");

        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    tracing::info!("Server shutdown requested");
                    break;
                }

                incoming_call = incoming.recv() => {
                    let Some(IncomingCall { method, call }) = incoming_call else {
                        tracing::info!("All server handles dropped");
                        break;
                    };

                    accepted += 1;
                    tracing::debug!(method = %method, "Accepted call");

                    let endpoint = endpoint.clone();
                    in_flight.spawn(async move {
                        endpoint.dispatch_call(&method, call).await;
                    });
                }

                // Reap finished calls so the set does not grow without bound.
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(err) = joined {
                        tracing::error!("Call task failed: {:?}", err);
                    }
                }
            }
        }

        // Calls still queued in the backlog are never dispatched; dropping
        // them cancels them for their peers.
        incoming.close();
        drop(incoming);

        while let Some(joined) = in_flight.join_next().await {
            if let Err(err) = joined {
                tracing::error!("Call task failed: {:?}", err);
            }
        }

        tracing::info!(accepted, "Server stopped");
        accepted
    }
}
