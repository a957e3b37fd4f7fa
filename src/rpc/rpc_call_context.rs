use super::{ActiveCall, CallError, RpcHandlerError};
use std::io;

/// The view of the active call a handler receives.
///
/// Streaming-request handlers read their requests through it, and
/// bidirectional handlers write their responses through it.
pub struct RpcCallContext<'a> {
    call: &'a mut dyn ActiveCall,
}

impl<'a> RpcCallContext<'a> {
    pub fn new(call: &'a mut dyn ActiveCall) -> Self {
        Self { call }
    }

    /// Reads the next raw request, or `None` once the peer is done sending.
    pub async fn read(&mut self) -> Result<Option<Vec<u8>>, CallError> {
        self.call.read_request().await
    }

    pub async fn write(&mut self, message: Vec<u8>) -> Result<(), CallError> {
        self.call.write_response(message).await
    }

    /// Reads the next request and decodes it.
    pub async fn read_with<T, D>(&mut self, decode: D) -> Result<Option<T>, RpcHandlerError>
    where
        D: FnOnce(&[u8]) -> Result<T, io::Error> + Send,
    {
        match self.read().await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encodes `value` and writes it as the next response.
    pub async fn write_with<T, E>(&mut self, value: T, encode: E) -> Result<(), RpcHandlerError>
    where
        E: FnOnce(T) -> Result<Vec<u8>, io::Error>,
    {
        let bytes = encode(value)?;
        self.write(bytes).await?;
        Ok(())
    }
}
