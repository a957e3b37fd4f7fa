use callflow_rpc_service::{DEFAULT_CALL_ACCEPT_BACKLOG, DEFAULT_RPC_STREAM_CHANNEL_BUFFER_SIZE};

/// Tuning knobs for [`crate::RpcServer`] and the channel calls it accepts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RpcServerConfig {
    /// Capacity, in messages, of each direction of a [`crate::ChannelCall`].
    pub call_buffer_size: usize,
    /// Number of opened calls that may wait for the accept loop.
    pub accept_backlog: usize,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            call_buffer_size: DEFAULT_RPC_STREAM_CHANNEL_BUFFER_SIZE,
            accept_backlog: DEFAULT_CALL_ACCEPT_BACKLOG,
        }
    }
}

impl RpcServerConfig {
    pub fn with_call_buffer_size(mut self, call_buffer_size: usize) -> Self {
        self.call_buffer_size = call_buffer_size;
        self
    }

    pub fn with_accept_backlog(mut self, accept_backlog: usize) -> Self {
        self.accept_backlog = accept_backlog;
        self
    }

    // `tokio::sync::mpsc::channel` panics on a zero capacity.
    pub(crate) fn call_capacity(&self) -> usize {
        self.call_buffer_size.max(1)
    }

    pub(crate) fn backlog_capacity(&self) -> usize {
        self.accept_backlog.max(1)
    }
}
