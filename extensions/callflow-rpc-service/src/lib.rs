pub mod constants;
pub use constants::*;
mod macros;
pub use macros::*;
mod rpc_method;
pub use rpc_method::*;
mod typed_handlers;
pub use typed_handlers::*;
