use crate::codec::{decode, encode};
use bitcode::{Decode, Encode};
use callflow::rpc::{Single, Stream};
use callflow_rpc_service::RpcMethod;
use std::io;

#[derive(Encode, Decode, PartialEq, Debug, Clone)]
pub struct RepeatRequest {
    pub text: String,
    pub times: u32,
}

/// Server streaming: sends `text` back `times` times, numbered.
pub struct Repeat;

impl RpcMethod for Repeat {
    const METHOD_NAME: &'static str = "example.repeat";

    type Request = Single<RepeatRequest>;
    type Response = Stream<String>;

    fn encode_request(input: RepeatRequest) -> Result<Vec<u8>, io::Error> {
        encode(&input)
    }

    fn decode_request(bytes: &[u8]) -> Result<RepeatRequest, io::Error> {
        decode(bytes)
    }

    fn encode_response(output: String) -> Result<Vec<u8>, io::Error> {
        encode(&output)
    }

    fn decode_response(bytes: &[u8]) -> Result<String, io::Error> {
        decode(bytes)
    }
}
