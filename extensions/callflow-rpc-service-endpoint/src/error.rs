use callflow::rpc::RpcArityError;
use std::fmt;

/// Reasons a method cannot be added to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcServiceEndpointError {
    /// The handler's declared parameter count does not fit the method's shape.
    Arity {
        method: String,
        source: RpcArityError,
    },
    /// A handler for the method is already registered.
    Duplicate { method: String },
    /// A different method already holds the same method ID.
    IdCollision { method: String, existing: String },
}

impl fmt::Display for RpcServiceEndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcServiceEndpointError::Arity { method, source } => {
                write!(f, "cannot register `{}`: {}", method, source)
            }
            RpcServiceEndpointError::Duplicate { method } => {
                write!(f, "a handler for `{}` is already registered", method)
            }
            RpcServiceEndpointError::IdCollision { method, existing } => write!(
                f,
                "cannot register `{}`: its method ID is already used by `{}`",
                method, existing
            ),
        }
    }
}

impl std::error::Error for RpcServiceEndpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RpcServiceEndpointError::Arity { source, .. } => Some(source),
            RpcServiceEndpointError::Duplicate { .. }
            | RpcServiceEndpointError::IdCollision { .. } => None,
        }
    }
}
