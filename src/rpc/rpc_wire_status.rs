use super::StatusCode;
use crate::constants::STATUS_OK_MESSAGE;
use std::fmt;

/// The `(code, message)` pair that terminates a call on the wire.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WireStatus {
    pub code: StatusCode,
    pub message: String,
}

impl WireStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// `(OK, "OK")`, sent when a handler completes normally.
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok, STATUS_OK_MESSAGE)
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }
}

impl fmt::Display for WireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {} ({:?}): {}", self.code.value(), self.code, self.message)
    }
}
