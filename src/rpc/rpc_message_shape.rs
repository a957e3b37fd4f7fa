use std::fmt;
use std::marker::PhantomData;

/// Cardinality of one side of an RPC method.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MessageShape {
    /// Exactly one message of the type.
    Single,
    /// Zero or more messages of the type, in order.
    Stream,
}

impl MessageShape {
    #[inline]
    pub const fn is_stream(self) -> bool {
        matches!(self, MessageShape::Stream)
    }
}

impl fmt::Display for MessageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageShape::Single => write!(f, "single"),
            MessageShape::Stream => write!(f, "stream"),
        }
    }
}

/// Type-level tag describing one side of a method as a message type plus its
/// cardinality.
///
/// Only [`Single`] and [`Stream`] implement this trait.
pub trait ShapeMarker {
    /// The message type carried on this side of the call.
    type Message;

    /// The cardinality this marker stands for.
    const SHAPE: MessageShape;
}

/// Marks one side of a method as carrying exactly one `T`.
pub struct Single<T>(PhantomData<fn() -> T>);

/// Marks one side of a method as carrying a stream of `T`.
pub struct Stream<T>(PhantomData<fn() -> T>);

impl<T> ShapeMarker for Single<T> {
    type Message = T;
    const SHAPE: MessageShape = MessageShape::Single;
}

impl<T> ShapeMarker for Stream<T> {
    type Message = T;
    const SHAPE: MessageShape = MessageShape::Stream;
}
