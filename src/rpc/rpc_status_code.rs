use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Status codes sent as the final word on every call.
///
/// The numeric values match the gRPC status codes so they can be carried on
/// the wire unchanged.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum StatusCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl StatusCode {
    #[inline]
    pub fn value(self) -> i32 {
        self.into()
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatusCode::Ok => "The operation completed successfully",
            StatusCode::Cancelled => "The operation was cancelled",
            StatusCode::Unknown => "Unknown error",
            StatusCode::InvalidArgument => "Client specified an invalid argument",
            StatusCode::DeadlineExceeded => "Deadline expired before operation could complete",
            StatusCode::NotFound => "Some requested entity was not found",
            StatusCode::AlreadyExists => "Some entity that we attempted to create already exists",
            StatusCode::PermissionDenied => {
                "The caller does not have permission to execute the specified operation"
            }
            StatusCode::ResourceExhausted => "Some resource has been exhausted",
            StatusCode::FailedPrecondition => {
                "The system is not in a state required for the operation's execution"
            }
            StatusCode::Aborted => "The operation was aborted",
            StatusCode::OutOfRange => "Operation was attempted past the valid range",
            StatusCode::Unimplemented => "Operation is not implemented or not supported",
            StatusCode::Internal => "Internal error",
            StatusCode::Unavailable => "The service is currently unavailable",
            StatusCode::DataLoss => "Unrecoverable data loss or corruption",
            StatusCode::Unauthenticated => "The request does not have valid authentication credentials",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.description(), f)
    }
}
