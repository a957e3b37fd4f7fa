use super::RpcServiceEndpointInterface;
use callflow::rpc::{RpcHandler, RpcMethodDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

// --- Conditionally Alias the RwLock Implementation ---
#[cfg(not(feature = "tokio_support"))]
use std::sync::RwLock;
#[cfg(feature = "tokio_support")]
use tokio::sync::RwLock;

/// A method that passed validation and can be served.
#[derive(Debug, Clone)]
pub struct RpcRegisteredMethod {
    pub descriptor: Arc<RpcMethodDescriptor>,
    pub handler: RpcHandler,
}

impl RpcRegisteredMethod {
    /// Whether this entry was registered under exactly `method_name`.
    ///
    /// Entries are keyed by a hash of the name, so a hit on the key alone
    /// does not identify the method.
    pub fn serves(&self, method_name: &str) -> bool {
        self.descriptor.name() == method_name
    }
}

/// Registered methods keyed by the hash of their name.
pub type RpcHandlerMap = HashMap<u64, RpcRegisteredMethod>;

/// A concrete RPC service endpoint: the table of methods a server serves.
pub struct RpcServiceEndpoint {
    handlers: Arc<RwLock<RpcHandlerMap>>,
}

impl Default for RpcServiceEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcServiceEndpoint {
    /// Creates an endpoint with no methods registered.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl RpcServiceEndpointInterface for RpcServiceEndpoint {
    type HandlersLock = RwLock<RpcHandlerMap>;

    fn get_handlers(&self) -> Arc<Self::HandlersLock> {
        self.handlers.clone()
    }
}
