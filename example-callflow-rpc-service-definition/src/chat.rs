use crate::codec::{decode, encode};
use callflow::rpc::Stream;
use callflow_rpc_service::RpcMethod;
use std::io;

/// Bidirectional streaming: both sides exchange text lines freely.
pub struct Chat;

impl RpcMethod for Chat {
    const METHOD_NAME: &'static str = "example.chat";

    type Request = Stream<String>;
    type Response = Stream<String>;

    fn encode_request(input: String) -> Result<Vec<u8>, io::Error> {
        encode(&input)
    }

    fn decode_request(bytes: &[u8]) -> Result<String, io::Error> {
        decode(bytes)
    }

    fn encode_response(output: String) -> Result<Vec<u8>, io::Error> {
        encode(&output)
    }

    fn decode_response(bytes: &[u8]) -> Result<String, io::Error> {
        decode(bytes)
    }
}
