use super::CallShape;
use std::fmt;

/// A handler was declared with the wrong number of parameters for the shape
/// of the method it was registered against.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RpcArityError {
    pub shape: CallShape,
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for RpcArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} handler must declare {} parameter(s), found {}",
            self.shape, self.expected, self.actual
        )
    }
}

impl std::error::Error for RpcArityError {}

/// Checks a handler's declared parameter count against the count `shape`
/// requires. Never invokes the handler.
pub fn validate_arity(shape: CallShape, declared: usize) -> Result<(), RpcArityError> {
    let expected = shape.handler_arity();
    if declared == expected {
        Ok(())
    } else {
        Err(RpcArityError {
            shape,
            expected,
            actual: declared,
        })
    }
}
