use crate::method_id_hash;
use callflow::rpc::{RpcMethodDescriptor, ShapeMarker};
use std::io;

/// The request message type of method `M`.
pub type RequestOf<M> = <<M as RpcMethod>::Request as ShapeMarker>::Message;

/// The response message type of method `M`.
pub type ResponseOf<M> = <<M as RpcMethod>::Response as ShapeMarker>::Message;

/// A typed RPC method definition: its name, the cardinality and message type
/// of each side, and the codec used for its messages.
///
/// `Request` and `Response` are [`Single`](callflow::rpc::Single) or
/// [`Stream`](callflow::rpc::Stream) markers; together they fix the method's
/// call shape.
pub trait RpcMethod: Sized {
    /// Fully qualified method name, used for routing.
    const METHOD_NAME: &'static str;

    /// Routing ID derived from the method name.
    const METHOD_ID: u64 = method_id_hash(Self::METHOD_NAME);

    type Request: ShapeMarker;
    type Response: ShapeMarker;

    /// Encodes one request message.
    fn encode_request(input: RequestOf<Self>) -> Result<Vec<u8>, io::Error>;

    /// Decodes one request message.
    fn decode_request(bytes: &[u8]) -> Result<RequestOf<Self>, io::Error>;

    /// Encodes one response message.
    fn encode_response(output: ResponseOf<Self>) -> Result<Vec<u8>, io::Error>;

    /// Decodes one response message.
    fn decode_response(bytes: &[u8]) -> Result<ResponseOf<Self>, io::Error>;

    /// The descriptor the dispatcher serves this method with.
    fn descriptor() -> RpcMethodDescriptor {
        RpcMethodDescriptor::from_markers::<Self::Request, Self::Response>(Self::METHOD_NAME)
    }
}
