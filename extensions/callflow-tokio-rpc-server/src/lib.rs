mod channel_call;
pub use channel_call::*;

mod error;
pub use error::*;

mod rpc_server;
pub use rpc_server::*;

mod rpc_server_config;
pub use rpc_server_config::*;
