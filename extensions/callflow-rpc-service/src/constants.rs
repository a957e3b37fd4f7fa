/// The default buffer size for the MPSC channels carrying the messages of one
/// call between a transport and its dispatch task.
///
/// This value represents the number of *messages* each channel can hold before
/// applying backpressure, not the total size in bytes.
///
/// A small buffer prioritizes low memory usage and responsive backpressure,
/// while a larger buffer lets a streaming handler run further ahead of a slow
/// peer at the cost of higher potential memory consumption.
pub const DEFAULT_RPC_STREAM_CHANNEL_BUFFER_SIZE: usize = 8;

/// The default number of accepted-but-not-yet-dispatched calls a server queues
/// before new calls have to wait.
pub const DEFAULT_CALL_ACCEPT_BACKLOG: usize = 64;
