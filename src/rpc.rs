mod rpc_active_call;
mod rpc_arity;
mod rpc_call_context;
mod rpc_call_error;
mod rpc_call_shape;
mod rpc_dispatcher;
mod rpc_handler;
mod rpc_handler_error;
mod rpc_message_shape;
mod rpc_method_descriptor;
mod rpc_status_code;
mod rpc_status_translator;
mod rpc_wire_status;

pub use rpc_active_call::ActiveCall;
pub use rpc_arity::{RpcArityError, validate_arity};
pub use rpc_call_context::RpcCallContext;
pub use rpc_call_error::CallError;
pub use rpc_call_shape::CallShape;
pub use rpc_dispatcher::dispatch;
pub use rpc_handler::{BoxFuture, RpcHandler, RpcHandlerArgs, RpcHandlerResult, RpcReply};
pub use rpc_handler_error::RpcHandlerError;
pub use rpc_message_shape::{MessageShape, ShapeMarker, Single, Stream};
pub use rpc_method_descriptor::RpcMethodDescriptor;
pub use rpc_status_code::StatusCode;
pub use rpc_status_translator::{RpcOutcome, translate};
pub use rpc_wire_status::WireStatus;
