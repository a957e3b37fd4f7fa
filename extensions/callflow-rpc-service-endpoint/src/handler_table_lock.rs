use crate::endpoint::RpcHandlerMap;
use std::sync::{PoisonError, RwLock};

/// Shared access to an endpoint's method table, independent of the runtime.
///
/// Every dispatched call performs a lookup while registration happens a
/// handful of times at startup, so implementations are read/write locks:
/// concurrent calls resolve their methods without serializing on the table.
/// Neither closure may await, so a blocking lock never stalls an executor
/// for longer than a map operation.
#[async_trait::async_trait]
pub trait HandlerTableLock: Send + Sync {
    /// Runs `f` with shared access to the table.
    async fn read_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RpcHandlerMap) -> R + Send,
        R: Send;

    /// Runs `f` with exclusive access to the table.
    async fn write_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RpcHandlerMap) -> R + Send,
        R: Send;
}

#[cfg(feature = "tokio_support")]
#[async_trait::async_trait]
impl HandlerTableLock for tokio::sync::RwLock<RpcHandlerMap> {
    async fn read_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RpcHandlerMap) -> R + Send,
        R: Send,
    {
        f(&*self.read().await)
    }

    async fn write_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RpcHandlerMap) -> R + Send,
        R: Send,
    {
        f(&mut *self.write().await)
    }
}

// A writer that panicked mid-registration leaves at most a missing entry;
// the map itself stays consistent, so poisoning is not propagated.
#[async_trait::async_trait]
impl HandlerTableLock for RwLock<RpcHandlerMap> {
    async fn read_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RpcHandlerMap) -> R + Send,
        R: Send,
    {
        let table = self.read().unwrap_or_else(PoisonError::into_inner);
        f(&table)
    }

    async fn write_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RpcHandlerMap) -> R + Send,
        R: Send,
    {
        let mut table = self.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RpcRegisteredMethod;
    use callflow::rpc::{RpcHandler, RpcMethodDescriptor, Single};
    use std::sync::Arc;

    fn entry(name: &'static str) -> RpcRegisteredMethod {
        RpcRegisteredMethod {
            descriptor: Arc::new(RpcMethodDescriptor::from_markers::<
                Single<Vec<u8>>,
                Single<Vec<u8>>,
            >(name)),
            handler: RpcHandler::request_response(|req, _ctx| Box::pin(async move { Ok(req) })),
        }
    }

    #[tokio::test]
    async fn writes_are_visible_to_reads() {
        let table = RwLock::new(RpcHandlerMap::new());
        table
            .write_handlers(|handlers| handlers.insert(1, entry("a")))
            .await;

        let name = table
            .read_handlers(|handlers| handlers.get(&1).map(|m| m.descriptor.name().to_string()))
            .await;
        assert_eq!(name.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn poisoned_table_stays_usable() {
        let table = Arc::new(RwLock::new(RpcHandlerMap::new()));

        let poisoner = table.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.write().unwrap();
            panic!("registration panicked");
        })
        .join();
        assert!(table.is_poisoned());

        table
            .write_handlers(|handlers| handlers.insert(7, entry("b")))
            .await;
        assert_eq!(table.read_handlers(|handlers| handlers.len()).await, 1);
    }
}
